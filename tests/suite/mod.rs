mod config_load;
mod gas_flow;
mod intro_flow;
mod navigation;
mod siphon_flow;
