mod local_content_store;

pub use local_content_store::LocalContentStore;
