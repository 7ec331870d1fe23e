mod path;
mod report;
