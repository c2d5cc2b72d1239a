//! Source resolution, parameter validation and chart generation
//!
//! [`FileManager`] ties the registry, the readers and a [`ChartRenderer`]
//! together. It holds no per-workflow state: a [`ChartSession`] returned by
//! [`FileManager::begin`] carries the identifier, its schema and the
//! parameters collected so far.

use crate::constants::{LABEL_COLUMN_FIELD, VALUE_COLUMN_FIELD};
use crate::data::chart_engine::{ChartRenderer, LineChartRenderer};
use crate::data::error::{DataError, DataResult};
use crate::data::params::{
    FieldSpec, ParamKind, ParameterSchema, Params, ValidationPolicy, validate,
};
use crate::data::readers::OpenOptions;
use crate::data::registry::ReaderRegistry;

/// Axis fields every chart needs, whatever the source
pub fn global_schema() -> ParameterSchema {
    ParameterSchema::new(vec![
        FieldSpec::new(LABEL_COLUMN_FIELD, ParamKind::String, "Label column"),
        FieldSpec::new(VALUE_COLUMN_FIELD, ParamKind::String, "Value column"),
    ])
}

/// One chart workflow over a single source
#[derive(Clone, Debug)]
pub struct ChartSession {
    identifier: String,
    display_name: &'static str,
    schema: ParameterSchema,
    policy: ValidationPolicy,
    params: Option<Params>,
}

impl ChartSession {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Reader fields followed by the axis fields
    pub fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    /// Validate and keep the values. On failure the previous values stay.
    pub fn set_parameters(&mut self, values: Params) -> DataResult<()> {
        validate(&self.schema, &values, &self.policy)?;
        self.params = Some(values);
        Ok(())
    }

    pub fn parameters(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.params.is_some()
    }
}

/// Dispatches identifiers to readers and feeds the result to a renderer
pub struct FileManager<R = LineChartRenderer> {
    registry: ReaderRegistry,
    renderer: R,
    options: OpenOptions,
}

impl FileManager<LineChartRenderer> {
    pub fn new() -> Self {
        Self::with_renderer(LineChartRenderer::default())
    }
}

impl Default for FileManager<LineChartRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ChartRenderer> FileManager<R> {
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            registry: ReaderRegistry::builtin().clone(),
            renderer,
            options: OpenOptions::default(),
        }
    }

    pub fn registry(mut self, registry: ReaderRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn options(mut self, options: OpenOptions) -> Self {
        self.options = options;
        self
    }

    pub fn reader_registry(&self) -> &ReaderRegistry {
        &self.registry
    }

    pub fn open_options(&self) -> &OpenOptions {
        &self.options
    }

    /// Every field the user must supply for this source, with labels
    pub fn required_fields(&self, identifier: &str) -> DataResult<ParameterSchema> {
        let entry = self.registry.resolve(identifier)?;
        Ok((entry.schema)().merged(&global_schema()))
    }

    /// Start a chart workflow for a source
    pub fn begin(&self, identifier: &str) -> DataResult<ChartSession> {
        let entry = self.registry.resolve(identifier)?;
        Ok(ChartSession {
            identifier: identifier.to_string(),
            display_name: entry.display_name,
            schema: (entry.schema)().merged(&global_schema()),
            policy: self.options.policy,
            params: None,
        })
    }

    /// Human-readable label of a source. Parameters are not validated.
    pub fn describe_source(&self, identifier: &str, params: Option<&Params>) -> DataResult<String> {
        let entry = self.registry.resolve(identifier)?;
        let empty = Params::new();
        let options = OpenOptions {
            validate: false,
            ..self.options.clone()
        };
        let reader = (entry.open)(identifier, params.unwrap_or(&empty), &options)?;
        Ok(reader.describe())
    }

    /// Read the source and render the two axis columns
    pub fn generate_chart(&self, identifier: &str, params: &Params) -> DataResult<R::Chart> {
        let entry = self.registry.resolve(identifier)?;
        let schema = (entry.schema)().merged(&global_schema());
        validate(&schema, params, &self.options.policy)?;

        let mut reader_params = params.clone();
        let label_column = axis_name(&mut reader_params, LABEL_COLUMN_FIELD)?;
        let value_column = axis_name(&mut reader_params, VALUE_COLUMN_FIELD)?;

        let reader = (entry.open)(identifier, &reader_params, &self.options)?;
        let table = reader.read()?;

        let label = table.column(&label_column)?;
        let value = table.column(&value_column)?;

        tracing::info!(
            "Charting {} vs {} from {} ({} rows)",
            value_column,
            label_column,
            reader.describe(),
            table.height()
        );

        Ok(self.renderer.render(&label, &value))
    }

    /// Generate from the values collected by a session
    pub fn generate_for(&self, session: &ChartSession) -> DataResult<R::Chart> {
        let params = session
            .parameters()
            .ok_or_else(|| DataError::MissingParameters {
                missing: session.schema().names().iter().map(|s| s.to_string()).collect(),
            })?;
        self.generate_chart(session.identifier(), params)
    }
}

fn axis_name(params: &mut Params, field: &str) -> DataResult<String> {
    match params.remove(field) {
        Some(value) => value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DataError::TypeMismatch {
                field: field.to_string(),
                expected: ParamKind::String,
                actual: value.kind(),
            }),
        None => Err(DataError::MissingParameters {
            missing: vec![field.to_string()],
        }),
    }
}
