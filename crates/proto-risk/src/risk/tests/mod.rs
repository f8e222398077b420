mod common;
mod scoring;
mod weights;
