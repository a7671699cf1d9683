use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{AttendanceOps, AuditOps, Context, RoleOps, StudentOps};
use crate::Result;
use crate::backend::{AttendanceBackend, FileBackend};
use crate::config::Config;
use crate::worker::SaveWorker;
use rollcall_types::ClassId;

/// Entry point to a rollcall data directory
pub struct Rollcall {
    data_dir: PathBuf,
    config: Arc<Config>,
    ctx: Context,
}

impl Rollcall {
    /// Open (or lazily create) the workspace at `data_dir`, backed by JSON files
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        let config = Config::load_from(&Config::path_in(&data_dir))?;
        let backend = Arc::new(FileBackend::new(&data_dir));
        tracing::debug!(data_dir = %data_dir.display(), "workspace opened");
        Ok(Self::with_backend(data_dir, backend, config))
    }

    pub fn with_backend(
        data_dir: PathBuf,
        backend: Arc<dyn AttendanceBackend>,
        config: Config,
    ) -> Self {
        let actor: Arc<str> = Arc::from(config.operator());
        Self {
            data_dir,
            config: Arc::new(config),
            ctx: Context { backend, actor },
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn actor(&self) -> &str {
        &self.ctx.actor
    }

    /// `[export] directory`, falling back to `<data_dir>/exports`
    pub fn export_dir(&self) -> PathBuf {
        self.config
            .export
            .directory
            .clone()
            .unwrap_or_else(|| self.data_dir.join("exports"))
    }

    /// `[school] default_class` when no class is given on the command line
    pub fn resolve_class(&self, explicit: Option<&str>) -> Result<ClassId> {
        match explicit.or(self.config.school.default_class.as_deref()) {
            Some(class) => Ok(class.parse()?),
            None => Err(crate::Error::Config(
                "no class given and [school] default_class is not set".to_string(),
            )),
        }
    }

    pub fn attendance(&self) -> AttendanceOps {
        AttendanceOps::new(self.ctx.clone())
    }

    pub fn students(&self) -> StudentOps {
        StudentOps::new(self.ctx.clone())
    }

    pub fn roles(&self) -> RoleOps {
        RoleOps::new(self.ctx.clone())
    }

    pub fn audit(&self) -> AuditOps {
        AuditOps::new(self.ctx.clone())
    }

    pub fn save_worker(&self) -> SaveWorker {
        SaveWorker::new(self.attendance())
    }

    pub fn seed_demo(&self, class_id: &ClassId) -> Result<usize> {
        let added = crate::demo::seed(self.ctx.backend.as_ref(), class_id)?;
        if added > 0 {
            self.ctx.audit(
                "class.seed",
                format!("class/{}", class_id),
                format!("{} demo students", added),
            );
        }
        Ok(added)
    }
}
