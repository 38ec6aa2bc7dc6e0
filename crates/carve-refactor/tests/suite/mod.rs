mod common;
mod dispatch;
mod expressions;
mod properties;
mod provider;
mod scenarios;
mod statements;
