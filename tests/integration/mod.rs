//! Integration tests module
//! 
//! This module organizes all integration tests for the r-plexpanel application.

// Import individual test modules
pub mod config_test;
pub mod plexamp_client_test;
