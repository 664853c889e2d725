mod logging;
mod output_file;
mod parameters;
mod templates;
mod time;

pub use logging::setup_logging;
pub use output_file::{
    output_file_name, output_file_path, read_deployment_outputs, write_deployment_outputs,
};
pub use parameters::{
    inline_overrides, load_parameters_file, merge_parameters, to_parameters_document,
};
pub use templates::{
    resolve_templates, DEFAULT_PARAMETERS_FILE_NAME, TEMPLATE_FILE_NAME,
};
pub use time::{deployment_name, deployment_name_at};
