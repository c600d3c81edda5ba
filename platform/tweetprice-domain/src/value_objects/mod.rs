pub mod interval;
pub mod joined;
pub mod options;
pub mod post;
pub mod price_bar;
pub mod raw_table;
pub mod resolved;
