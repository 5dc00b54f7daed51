pub mod calibration;
pub mod config;
pub mod correspondence;
pub mod dataset;
pub mod delta;
pub mod detector;
pub mod error;
pub mod frame;
pub mod my_types;
pub mod pairing;
pub mod report;
pub mod source;
pub mod study;
pub mod tan;
pub mod timestamp;
