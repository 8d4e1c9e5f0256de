mod boundaries;
mod dimmer;
mod export;
mod reference_table;
mod round_trip;
