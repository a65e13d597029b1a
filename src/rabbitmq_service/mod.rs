pub mod rabbitmq_service;
pub mod structs;
