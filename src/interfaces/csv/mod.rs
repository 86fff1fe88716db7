pub mod event_reader;
pub mod settlement_writer;
