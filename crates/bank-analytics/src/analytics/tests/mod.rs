mod common;
mod features;
mod service;
