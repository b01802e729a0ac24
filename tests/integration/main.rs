mod entrypoint;
mod read_requests;
mod round_trips;
