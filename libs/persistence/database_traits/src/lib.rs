pub mod connection;
pub mod dao;
