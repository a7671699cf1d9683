use std::path::Path;

use crate::handlers::HandlerContext;
use crate::presentation::view_models::{
    CommandResultViewModel, ConfigViewModel, Guidance, MessageViewModel, StatusBadge,
};
use anyhow::{Result, bail};
use rollcall_runtime::Config;
use rollcall_types::ClassId;

pub fn show(data_dir: &Path, ctx: &HandlerContext) -> Result<()> {
    let path = Config::path_in(data_dir);
    let config = Config::load_from(&path)?;
    let vm = ConfigViewModel {
        data_dir: data_dir.display().to_string(),
        config_path: path.display().to_string(),
        exists: path.exists(),
        actor: config.operator(),
        toml: toml::to_string_pretty(&config)?,
    };

    let mut result = CommandResultViewModel::new(vm);
    if !path.exists() {
        result = result.with_suggestion(
            Guidance::new("Write the defaults to disk").with_command("rollcall config init"),
        );
    }
    ctx.render(result)
}

pub fn init(
    data_dir: &Path,
    force: bool,
    school: Option<String>,
    default_class: Option<String>,
    ctx: &HandlerContext,
) -> Result<()> {
    let path = Config::path_in(data_dir);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let mut config = Config::default();
    if let Some(name) = school {
        config.school.name = name;
    }
    if let Some(class) = default_class {
        // Reject ids the class directory layout cannot hold
        let class: ClassId = class.parse()?;
        config.school.default_class = Some(class.to_string());
    }
    config.save_to(&path)?;
    tracing::info!(path = %path.display(), "config written");

    let vm = MessageViewModel {
        message: "Configuration written".to_string(),
        path: Some(path.display().to_string()),
    };
    ctx.render(CommandResultViewModel::new(vm).with_badge(StatusBadge::success("Initialized")))
}
