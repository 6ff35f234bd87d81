pub mod thought;

pub use thought::MongoThoughtRepository;
