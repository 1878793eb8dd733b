mod health_check;
mod help;
mod helper;
mod subscription;
