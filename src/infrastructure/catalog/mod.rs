pub mod csv_catalog;
