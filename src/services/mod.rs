pub mod account_service;
