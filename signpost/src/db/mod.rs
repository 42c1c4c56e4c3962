//! MongoDB connectivity.

pub mod mongo;

pub use mongo::MongoClient;
