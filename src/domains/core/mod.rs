pub mod file_storage_service;
