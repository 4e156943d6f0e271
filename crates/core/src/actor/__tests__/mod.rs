mod pipeline;
mod shutdown;
