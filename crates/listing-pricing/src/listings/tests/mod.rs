mod common;
mod conditions;
mod payload;
