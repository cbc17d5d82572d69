//! ID type wrappers for type safety.

mod id_macro;
pub mod principal_id;
pub mod store_instance_id;

pub use principal_id::PrincipalId;
pub use store_instance_id::StoreInstanceId;
