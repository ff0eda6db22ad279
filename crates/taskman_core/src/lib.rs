pub mod datetime;
pub mod error;
pub mod model;
pub mod notify;
pub mod ops;
pub mod prefs;
pub mod storage;
pub mod view;
