pub mod business;
pub mod calculator;
pub mod charts;
pub mod demo;
