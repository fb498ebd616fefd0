//! End-to-end scenarios

mod hetero_lr_job;
mod job_file_render;
mod route_table_management;
