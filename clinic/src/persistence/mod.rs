pub mod sled_store;

pub use sled_store::{SledStore, decode_id, get_json, id_key, insert_new, replace_existing};
