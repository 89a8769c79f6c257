mod capture;
mod input;
