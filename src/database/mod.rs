pub mod db;

pub use db::{connect, migrate};
