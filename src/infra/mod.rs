pub mod classsearch;
