mod layout;
mod scalars;
