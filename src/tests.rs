mod pipeline;
mod utils;
