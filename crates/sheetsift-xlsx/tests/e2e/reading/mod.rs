mod data_types;
mod package;
mod styles;
