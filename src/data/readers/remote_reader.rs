//! One table of a remote relational engine.
//!
//! PostgreSQL, MySQL and MariaDB share this reader; the [`Dialect`] picks the
//! client. Both clients are asked for rows in text form and the column types
//! are inferred afterwards, so every engine type that has a text rendering
//! reaches the table.

use super::{OpenOptions, SourceReader, text_or_placeholder};
use crate::data::error::{DataError, DataResult};
use crate::data::infer::rows_from_text;
use crate::data::params::{FieldSpec, ParamKind, ParameterSchema, Params, validate};
use crate::data::table::Table;
use crate::types::DataOrigin;
use std::time::Duration;

/// Supported remote engines
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dialect {
    PostgreSql,
    MySql,
    MariaDb,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::PostgreSql, Dialect::MySql, Dialect::MariaDb];

    /// Source identifier selecting this engine
    pub fn tag(&self) -> &'static str {
        match self {
            Dialect::PostgreSql => "postgresql",
            Dialect::MySql => "mysql",
            Dialect::MariaDb => "mariadb",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Dialect::PostgreSql => "PostgreSQL",
            Dialect::MySql => "MySQL",
            Dialect::MariaDb => "MariaDB",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.tag() == tag)
    }
}

/// Connection parameters of a remote table
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub table_name: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Database to connect to
    pub schema: String,
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("table_name", &self.table_name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("schema", &self.schema)
            .finish()
    }
}

impl RemoteConfig {
    pub fn schema() -> ParameterSchema {
        ParameterSchema::new(vec![
            FieldSpec::new("table_name", ParamKind::String, "Table name"),
            FieldSpec::new("host", ParamKind::String, "Host"),
            FieldSpec::new("port", ParamKind::Integer, "Port"),
            FieldSpec::new("user", ParamKind::String, "User"),
            FieldSpec::new("password", ParamKind::String, "Password"),
            FieldSpec::new("schema", ParamKind::String, "Database"),
        ])
    }

    /// Parse the config, validating against [`Self::schema`] unless told not to
    pub fn from_params(params: &Params, options: &OpenOptions) -> DataResult<Self> {
        let port = if options.validate {
            validate(&Self::schema(), params, &options.policy)?;
            let raw = params.get("port").and_then(|v| v.as_i64()).unwrap_or_default();
            u16::try_from(raw).map_err(|_| DataError::InvalidParameter {
                field: "port".to_string(),
                reason: format!("{} is not a TCP port", raw),
            })?
        } else {
            params
                .get("port")
                .and_then(|v| v.as_i64())
                .and_then(|n| u16::try_from(n).ok())
                .unwrap_or_default()
        };

        Ok(Self {
            table_name: text_or_placeholder(params, "table_name"),
            host: text_or_placeholder(params, "host"),
            port,
            user: text_or_placeholder(params, "user"),
            password: params.text("password").unwrap_or_default().to_string(),
            schema: text_or_placeholder(params, "schema"),
        })
    }
}

/// Remote table reader
pub struct RemoteReader {
    dialect: Dialect,
    config: RemoteConfig,
    connect_timeout: Option<Duration>,
}

impl RemoteReader {
    pub fn new(dialect: Dialect, config: RemoteConfig, connect_timeout: Option<Duration>) -> Self {
        Self {
            dialect,
            config,
            connect_timeout,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    fn source_name(&self) -> String {
        format!(
            "{}://{}:{}/{}",
            self.dialect.tag(),
            self.config.host,
            self.config.port,
            self.config.schema
        )
    }

    fn read_postgres(&self) -> Result<(Vec<String>, Vec<Vec<String>>), postgres::Error> {
        use postgres::SimpleQueryMessage;

        let mut pg = postgres::Config::new();
        pg.host(&self.config.host)
            .port(self.config.port)
            .user(&self.config.user)
            .password(&self.config.password)
            .dbname(&self.config.schema);
        if let Some(timeout) = self.connect_timeout {
            pg.connect_timeout(timeout);
        }

        let mut client = pg.connect(postgres::NoTls)?;
        let query = format!("SELECT * FROM {}", quote_pg(&self.config.table_name));

        let mut headers: Vec<String> = Vec::new();
        let mut records: Vec<Vec<String>> = Vec::new();
        for message in client.simple_query(&query)? {
            if let SimpleQueryMessage::Row(row) = message {
                if headers.is_empty() {
                    headers = row.columns().iter().map(|c| c.name().to_string()).collect();
                }
                records.push(
                    (0..row.len())
                        .map(|i| row.get(i).unwrap_or_default().to_string())
                        .collect(),
                );
            }
        }

        Ok((headers, records))
    }

    fn read_mysql(&self) -> Result<(Vec<String>, Vec<Vec<String>>), mysql::Error> {
        use mysql::prelude::Queryable;

        let opts = mysql::OptsBuilder::new()
            .ip_or_hostname(Some(self.config.host.clone()))
            .tcp_port(self.config.port)
            .user(Some(self.config.user.clone()))
            .pass(Some(self.config.password.clone()))
            .db_name(Some(self.config.schema.clone()))
            .tcp_connect_timeout(self.connect_timeout);

        let mut conn = mysql::Conn::new(opts)?;
        let query = format!("SELECT * FROM {}", quote_mysql(&self.config.table_name));
        let rows: Vec<mysql::Row> = conn.query(query)?;

        let headers = rows
            .first()
            .map(|row| {
                row.columns_ref()
                    .iter()
                    .map(|c| c.name_str().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let records = rows
            .iter()
            .map(|row| (0..row.len()).map(|i| mysql_text(row.as_ref(i))).collect())
            .collect();

        Ok((headers, records))
    }
}

impl SourceReader for RemoteReader {
    fn display_name(&self) -> &'static str {
        self.dialect.display_name()
    }

    /// The dialect was resolved from its tag already; connection problems
    /// surface on read.
    fn validate_source(&self) -> DataResult<()> {
        Ok(())
    }

    fn read(&self) -> DataResult<Table> {
        let start = std::time::Instant::now();
        let source_name = self.source_name();

        let (headers, records) = match self.dialect {
            Dialect::PostgreSql => self
                .read_postgres()
                .map_err(|e| DataError::read(&source_name, e))?,
            Dialect::MySql | Dialect::MariaDb => self
                .read_mysql()
                .map_err(|e| DataError::read(&source_name, e))?,
        };
        let (columns, rows) = rows_from_text(&headers, &records);

        tracing::debug!(
            "Loaded {} table {} from {} with {} rows x {} cols in {:?}",
            self.dialect.display_name(),
            self.config.table_name,
            source_name,
            rows.len(),
            columns.len(),
            start.elapsed()
        );

        Table::from_rows(
            self.config.table_name.clone(),
            DataOrigin::Remote {
                dialect: self.dialect.tag().to_string(),
                host: self.config.host.clone(),
                table: self.config.table_name.clone(),
            },
            &columns,
            &rows,
        )?
        .numeric_only()
    }

    fn describe(&self) -> String {
        format!(
            "{} | {}/{}",
            self.dialect.display_name(),
            self.config.host,
            self.config.table_name
        )
    }
}

fn quote_pg(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_mysql(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Text rendering of a MySQL value; NULL becomes an empty string
fn mysql_text(value: Option<&mysql::Value>) -> String {
    match value {
        None | Some(mysql::Value::NULL) => String::new(),
        Some(mysql::Value::Bytes(bytes)) => String::from_utf8_lossy(bytes).into_owned(),
        Some(mysql::Value::Int(n)) => n.to_string(),
        Some(mysql::Value::UInt(n)) => n.to_string(),
        Some(mysql::Value::Float(n)) => n.to_string(),
        Some(mysql::Value::Double(n)) => n.to_string(),
        Some(other) => other.as_sql(true).trim_matches('\'').to_string(),
    }
}
