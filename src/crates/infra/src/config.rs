use config::{Config, Environment, File};
use domain::schema::{SchemaDef, TableNames};
use dotenvy::dotenv;
use serde::Deserialize;
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawConfig {
    database_url: String,
    /// 最大连接数
    max_connections: u32,
    /// 源文件根目录，递归扫描
    data_dir: String,
    /// 源文件扩展名（不含点）
    source_extension: String,
    /// 日志文件路径
    log_file: String,
    /// 流水线配置
    pipeline: RawPipelineConfig,
    /// 表名配置
    tables: RawTablesConfig,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            database_url: "".to_string(),
            max_connections: 5,
            data_dir: "data".to_string(),
            source_extension: "json".to_string(),
            log_file: "app.log".to_string(),
            pipeline: RawPipelineConfig::default(),
            tables: RawTablesConfig::default(),
        }
    }
}

/// 流水线配置（原始配置）
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawPipelineConfig {
    /// 遇到第一个损坏的源文件即中止
    fail_fast: bool,
    /// 成功后清空暂存表
    clear_staging: bool,
    /// 每处理多少个文件输出一次进度
    progress_every: usize,
}

impl Default for RawPipelineConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            clear_staging: false,
            progress_every: 100,
        }
    }
}

/// 表名配置（原始配置）
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawTablesConfig {
    staged_artists: String,
    staged_songs: String,
    artists: String,
    locations: String,
    artist_locations: String,
    albums: String,
    songs: String,
}

impl Default for RawTablesConfig {
    fn default() -> Self {
        let names = TableNames::default();
        Self {
            staged_artists: names.staged_artists,
            staged_songs: names.staged_songs,
            artists: names.artists,
            locations: names.locations,
            artist_locations: names.artist_locations,
            albums: names.albums,
            songs: names.songs,
        }
    }
}

impl From<RawTablesConfig> for TableNames {
    fn from(raw: RawTablesConfig) -> Self {
        TableNames {
            staged_artists: raw.staged_artists,
            staged_songs: raw.staged_songs,
            artists: raw.artists,
            locations: raw.locations,
            artist_locations: raw.artist_locations,
            albums: raw.albums,
            songs: raw.songs,
        }
    }
}

/// 流水线配置
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub fail_fast: bool,
    pub clear_staging: bool,
    pub progress_every: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfigImpl {
    pub database_url: String,
    pub max_connections: u32,
    pub data_dir: PathBuf,
    pub source_extension: String,
    pub log_file: String,
    pub pipeline: PipelineConfig,
    pub schema: SchemaDef,
}

impl AppConfigImpl {
    fn new(data: RawConfig) -> Result<Self, Box<dyn Error>> {
        if data.database_url.trim().is_empty() {
            return Err("database_url is not configured (set APP__DATABASE_URL)".into());
        }
        let schema = SchemaDef::new(data.tables.into())?;
        let pipeline = PipelineConfig {
            fail_fast: data.pipeline.fail_fast,
            clear_staging: data.pipeline.clear_staging,
            progress_every: data.pipeline.progress_every.max(1),
        };
        Ok(AppConfigImpl {
            database_url: data.database_url,
            max_connections: data.max_connections.max(1),
            data_dir: PathBuf::from(data.data_dir),
            source_extension: data.source_extension.trim_start_matches('.').to_string(),
            log_file: data.log_file,
            pipeline,
            schema,
        })
    }

    /// 加载顺序：可选的 config.toml，然后是 APP__ 前缀的环境变量
    pub fn load() -> Result<AppConfigImpl, Box<dyn Error>> {
        dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        let raw: RawConfig = config.try_deserialize()?; // serde 自动填充默认值
        AppConfigImpl::new(raw)
    }

    /// 只从指定文件加载，不读取环境变量
    pub fn load_from(path: &Path) -> Result<AppConfigImpl, Box<dyn Error>> {
        let config = Config::builder()
            .add_source(File::from(path))
            .build()?;

        let raw: RawConfig = config.try_deserialize()?;
        AppConfigImpl::new(raw)
    }
}
