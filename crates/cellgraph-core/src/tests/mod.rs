mod mutate;
mod resolve;
mod templates;
