pub mod charity_box;
pub mod content;
pub mod core;
pub mod dashboard;
pub mod donor;
pub mod integration;
pub mod inventory;
pub mod ledger;
pub mod report;
pub mod special_donation;
