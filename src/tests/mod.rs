mod common;

mod app_run;
mod oauth2_exchange;
