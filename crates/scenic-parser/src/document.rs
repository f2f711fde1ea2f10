//! Validation of an untyped JSON document into the semantic model.
//!
//! The [`Builder`] walks the document once. Document-level keys (`grid`,
//! `styles`, `fitText`) and every element are checked independently so
//! that all problems are reported together; any error rejects the whole
//! document.

use std::collections::HashMap;

use log::{debug, trace};
use serde_json::{Map, Value};

use scenic_core::{
    geometry::Side,
    semantic::{
        Arrow, ArrowEndpoint, Common, DEFAULT_GRID, Diagram, Element, Shape, ShapeKind, Text,
    },
    style::{StyleOverrides, StylePresets},
};

use crate::{
    Parsed,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError, Result},
};

type Object = Map<String, Value>;

const ELEMENT_TYPES: &str = "box, ellipse, diamond, text, arrow";
const SIDES: &str = "left, right, top, bottom, center";

/// Builds a [`Diagram`] from a parsed JSON value.
#[derive(Debug)]
pub(crate) struct Builder {
    collector: DiagnosticCollector,
}

impl Builder {
    pub(crate) fn new() -> Self {
        Self {
            collector: DiagnosticCollector::new(),
        }
    }

    pub(crate) fn build(mut self, root: &Value) -> std::result::Result<Parsed, ParseError> {
        let Some(root) = root.as_object() else {
            return Err(Diagnostic::error("document root must be an object")
                .with_code(ErrorCode::E100)
                .into());
        };
        let Some(raw_elements) = root.get("elements").and_then(Value::as_array) else {
            return Err(Diagnostic::error("document must include an `elements` array")
                .with_code(ErrorCode::E101)
                .with_path("/elements")
                .into());
        };

        let grid = self.check(read_grid(root)).unwrap_or(DEFAULT_GRID);
        let styles = read_styles(root, &mut self.collector);
        let styles = self.check(styles).unwrap_or_default();
        let fit_text = self.check(read_fit_text(root)).unwrap_or_default();

        let mut elements = Vec::with_capacity(raw_elements.len());
        let mut first_seen: HashMap<String, usize> = HashMap::new();
        for (index, raw) in raw_elements.iter().enumerate() {
            let path = format!("/elements/{index}");
            let Some(element) = self.check(read_element(raw, &path)) else {
                continue;
            };

            if let Some(id) = element.id() {
                if let Some(first) = first_seen.get(id) {
                    self.collector.emit(
                        Diagnostic::error(format!("element id `{id}` is defined multiple times"))
                            .with_code(ErrorCode::E208)
                            .with_path(format!("{path}/id"))
                            .with_help(format!("first defined at /elements/{first}/id")),
                    );
                } else {
                    first_seen.insert(id.to_string(), index);
                }
            }

            trace!(path = path.as_str(); "Validated element");
            elements.push(element);
        }

        let warnings = self.collector.finish()?;

        debug!(
            elements = elements.len(),
            presets = styles.len(),
            grid,
            fit_text,
            warnings = warnings.len();
            "Document validated"
        );

        let diagram = Diagram::new(elements)
            .with_grid(grid)
            .with_styles(styles)
            .with_fit_text(fit_text);
        Ok(Parsed::new(diagram, warnings))
    }

    fn check<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(diagnostic) => {
                self.collector.emit(diagnostic);
                None
            }
        }
    }
}

fn read_grid(root: &Object) -> Result<f64> {
    match root.get("grid") {
        None => Ok(DEFAULT_GRID),
        Some(Value::Null) => Ok(0.0),
        Some(value) => value
            .as_f64()
            .filter(|grid| grid.is_finite() && *grid >= 0.0)
            .ok_or_else(|| {
                Diagnostic::error("`grid` must be a non-negative number")
                    .with_code(ErrorCode::E102)
                    .with_path("/grid")
                    .with_help("use `0` or `null` to disable grid snapping")
            }),
    }
}

fn read_fit_text(root: &Object) -> Result<bool> {
    match root.get("fitText") {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(fit_text)) => Ok(*fit_text),
        Some(_) => Err(Diagnostic::error("`fitText` must be a boolean")
            .with_code(ErrorCode::E104)
            .with_path("/fitText")),
    }
}

/// Non-object presets are dropped with a warning.
fn read_styles(root: &Object, collector: &mut DiagnosticCollector) -> Result<StylePresets> {
    let raw = match root.get("styles") {
        None | Some(Value::Null) => return Ok(StylePresets::new()),
        Some(Value::Object(raw)) => raw,
        Some(_) => {
            return Err(Diagnostic::error("`styles` must be an object if provided")
                .with_code(ErrorCode::E103)
                .with_path("/styles"));
        }
    };

    let mut presets = StylePresets::with_capacity(raw.len());
    for (name, value) in raw {
        let path = format!("/styles/{}", escape_pointer_token(name));
        let Some(record) = value.as_object() else {
            debug!(preset = name.as_str(); "Skipping style preset that is not an object");
            collector.emit(
                Diagnostic::warning(format!(
                    "style preset `{name}` is not an object and is ignored"
                ))
                .with_path(path),
            );
            continue;
        };
        presets.insert(name.clone(), read_style_record(record, &path)?);
    }
    Ok(presets)
}

fn read_style_record(record: &Object, path: &str) -> Result<StyleOverrides> {
    let code = ErrorCode::E205;
    Ok(StyleOverrides {
        stroke_color: optional_string(record, "strokeColor", path, code)?,
        background_color: optional_string(record, "backgroundColor", path, code)?,
        fill_style: optional_string(record, "fillStyle", path, code)?,
        stroke_width: optional_number(record, "strokeWidth", path, code)?,
        stroke_style: optional_string(record, "strokeStyle", path, code)?,
        roughness: optional_number(record, "roughness", path, code)?,
        opacity: optional_number(record, "opacity", path, code)?,
    })
}

fn read_element(raw: &Value, path: &str) -> Result<Element> {
    let Some(object) = raw.as_object() else {
        return Err(Diagnostic::error("each element must be an object")
            .with_code(ErrorCode::E200)
            .with_path(path));
    };
    let Some(type_name) = object.get("type").and_then(Value::as_str) else {
        return Err(Diagnostic::error("each element must include a string `type`")
            .with_code(ErrorCode::E201)
            .with_path(format!("{path}/type"))
            .with_help(format!("expected one of: {ELEMENT_TYPES}")));
    };

    let type_name = type_name.to_lowercase();
    let common = read_common(object, path)?;

    match type_name.as_str() {
        "box" => read_shape(ShapeKind::Box, object, common, path),
        "ellipse" => read_shape(ShapeKind::Ellipse, object, common, path),
        "diamond" => read_shape(ShapeKind::Diamond, object, common, path),
        "text" => read_text(object, common, path),
        "arrow" => read_arrow(object, common, path),
        other => Err(
            Diagnostic::error(format!("unsupported element type `{other}`"))
                .with_code(ErrorCode::E202)
                .with_path(format!("{path}/type"))
                .with_help(format!("expected one of: {ELEMENT_TYPES}")),
        ),
    }
}

fn read_common(object: &Object, path: &str) -> Result<Common> {
    Ok(Common {
        id: optional_string(object, "id", path, ErrorCode::E204)?,
        style: optional_string(object, "style", path, ErrorCode::E204)?,
        style_overrides: read_style_overrides(object, path)?,
    })
}

fn read_style_overrides(object: &Object, path: &str) -> Result<Option<StyleOverrides>> {
    match object.get("styleOverrides") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(record)) => {
            let overrides = read_style_record(record, &format!("{path}/styleOverrides"))?;
            Ok((!overrides.is_empty()).then_some(overrides))
        }
        Some(_) => Err(
            Diagnostic::error("`styleOverrides` must be an object if provided")
                .with_code(ErrorCode::E205)
                .with_path(format!("{path}/styleOverrides")),
        ),
    }
}

fn read_shape(kind: ShapeKind, object: &Object, common: Common, path: &str) -> Result<Element> {
    let required = |key: &str| {
        required_number(object, key, path).map_err(|diag| {
            diag.with_help(format!(
                "{} elements require numeric `x`, `y`, `w` and `h`",
                kind.id_prefix()
            ))
        })
    };

    let shape = Shape::new(
        kind,
        required("x")?,
        required("y")?,
        required("w")?,
        required("h")?,
    )
    .with_common(common);

    Ok(Element::Shape(shape))
}

fn read_text(object: &Object, common: Common, path: &str) -> Result<Element> {
    let code = ErrorCode::E204;
    let defaults = Text::new("");

    let text = Text {
        common,
        x: optional_number(object, "x", path, code)?.unwrap_or(defaults.x),
        y: optional_number(object, "y", path, code)?.unwrap_or(defaults.y),
        text: optional_string(object, "text", path, code)?.unwrap_or_default(),
        w: optional_number(object, "w", path, code)?,
        h: optional_number(object, "h", path, code)?,
        font_size: optional_number(object, "fontSize", path, code)?.unwrap_or(defaults.font_size),
        font_family: optional_integer(object, "fontFamily", path)?
            .unwrap_or(defaults.font_family),
        line_height: optional_number(object, "lineHeight", path, code)?
            .unwrap_or(defaults.line_height),
        padding: optional_number(object, "padding", path, code)?.unwrap_or(defaults.padding),
        text_align: optional_string(object, "textAlign", path, code)?
            .unwrap_or(defaults.text_align),
        vertical_align: optional_string(object, "verticalAlign", path, code)?
            .unwrap_or(defaults.vertical_align),
    };

    Ok(Element::Text(text))
}

fn read_arrow(object: &Object, common: Common, path: &str) -> Result<Element> {
    let from = read_endpoint(object, "from", path)?;
    let to = read_endpoint(object, "to", path)?;
    Ok(Element::Arrow(Arrow::new(from, to).with_common(common)))
}

fn read_endpoint(object: &Object, key: &str, path: &str) -> Result<ArrowEndpoint> {
    let Some(endpoint) = object.get(key).and_then(Value::as_object) else {
        return Err(Diagnostic::error("arrow must include `from` and `to` objects")
            .with_code(ErrorCode::E206)
            .with_path(format!("{path}/{key}")));
    };
    let path = format!("{path}/{key}");

    let Some(target) = endpoint.get("ref").and_then(Value::as_str) else {
        return Err(Diagnostic::error("arrow endpoint `ref` must be a string")
            .with_code(ErrorCode::E206)
            .with_path(format!("{path}/ref")));
    };

    let side = match endpoint.get("side") {
        None | Some(Value::Null) => Side::default(),
        Some(Value::String(side)) => side.parse::<Side>().map_err(|err| {
            Diagnostic::error(err.to_string())
                .with_code(ErrorCode::E207)
                .with_path(format!("{path}/side"))
                .with_help(format!("expected one of: {SIDES}"))
        })?,
        Some(_) => {
            return Err(Diagnostic::error("arrow endpoint `side` must be a string")
                .with_code(ErrorCode::E207)
                .with_path(format!("{path}/side"))
                .with_help(format!("expected one of: {SIDES}")));
        }
    };

    Ok(ArrowEndpoint::new(target, side))
}

fn required_number(object: &Object, key: &str, path: &str) -> Result<f64> {
    match object.get(key) {
        None | Some(Value::Null) => Err(Diagnostic::error(format!(
            "missing required field `{key}`"
        ))
        .with_code(ErrorCode::E203)
        .with_path(format!("{path}/{key}"))),
        Some(value) => value.as_f64().ok_or_else(|| {
            Diagnostic::error(format!("field `{key}` must be a number"))
                .with_code(ErrorCode::E203)
                .with_path(format!("{path}/{key}"))
        }),
    }
}

fn optional_number(object: &Object, key: &str, path: &str, code: ErrorCode) -> Result<Option<f64>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| {
            Diagnostic::error(format!("field `{key}` must be a number"))
                .with_code(code)
                .with_path(format!("{path}/{key}"))
        }),
    }
}

fn optional_integer(object: &Object, key: &str, path: &str) -> Result<Option<i64>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            // Fractional values truncate toward zero
            .or_else(|| value.as_f64().map(|number| number as i64))
            .map(Some)
            .ok_or_else(|| {
                Diagnostic::error(format!("field `{key}` must be an integer"))
                    .with_code(ErrorCode::E204)
                    .with_path(format!("{path}/{key}"))
            }),
    }
}

fn optional_string(
    object: &Object,
    key: &str,
    path: &str,
    code: ErrorCode,
) -> Result<Option<String>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(Diagnostic::error(format!("field `{key}` must be a string"))
            .with_code(code)
            .with_path(format!("{path}/{key}"))),
    }
}

/// Escapes a key for use as a JSON pointer reference token (RFC 6901).
fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
