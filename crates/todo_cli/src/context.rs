use eyre::WrapErr;
use log::info;
use std::path::Path;
use todo_core::db::{open_db, Connection};
use todo_core::{
    init_logging, load_config, AppConfig, FsObjectStore, SqliteTaskRepository, TodoService,
};

pub type CliService<'conn> = TodoService<SqliteTaskRepository<'conn>, FsObjectStore>;

/// Opened stores shared by every command of one invocation.
pub struct Context {
    pub config: AppConfig,
    conn: Connection,
    store: FsObjectStore,
}

impl Context {
    pub fn open(config_path: &Path) -> eyre::Result<Self> {
        let cwd = std::env::current_dir().wrap_err("cannot resolve working directory")?;
        let config = load_config(config_path)?.resolve_paths(&cwd);

        init_logging(&config.log_level, &config.log_dir)?;
        info!(
            "event=cli_start module=cli status=ok data_dir={}",
            config.data_dir.display()
        );

        if let Some(parent) = config.database_file.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("cannot create `{}`", parent.display()))?;
        }
        let conn = open_db(&config.database_file).wrap_err_with(|| {
            format!(
                "cannot open task store `{}`",
                config.database_file.display()
            )
        })?;
        let store = FsObjectStore::open(&config.storage_dir)?;

        Ok(Self {
            config,
            conn,
            store,
        })
    }

    pub fn service(&self) -> CliService<'_> {
        TodoService::new(SqliteTaskRepository::new(&self.conn), self.store.clone())
    }

    pub fn store(&self) -> &FsObjectStore {
        &self.store
    }

    pub fn today(&self) -> chrono::NaiveDate {
        chrono::Local::now().date_naive()
    }
}
