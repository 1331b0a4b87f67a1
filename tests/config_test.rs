use blanks::config::{FormConfig, Settings};
use blanks::engine::FormSession;
use std::fs;
use tempfile::TempDir;

const FORM_JSON: &str = r#"
{
    "formData": {
        "name": { "placeholder": "Widget name", "default": null, "type": "input" },
        "labelType": {
            "placeholder": "Label type",
            "default": "no-label",
            "type": "select-with-options",
            "options": [
                { "name": "Simple", "value": "no-label" },
                { "name": "Currency", "value": "currency" }
            ]
        },
        "labelCurrency": {
            "placeholder": "Label currency",
            "default": "usd",
            "type": "select",
            "options": [{ "name": "USD", "value": "usd" }]
        }
    },
    "formDataFillInTheBlanks": {
        "data": [
            { "type": "text", "data": "Name:" },
            { "type": "fieldControl", "formDataPointer": "name", "validators": [{ "type": "required" }] },
            {
                "type": "fieldControl",
                "formDataPointer": "labelType",
                "validators": [],
                "nodes": [
                    {
                        "filter": { "$in": ["currency"] },
                        "children": [{ "type": "fieldControl", "formDataPointer": "labelCurrency", "validators": [] }]
                    }
                ]
            }
        ]
    }
}
"#;

#[test]
fn test_load_settings_and_form() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    fs::create_dir_all(root.join("forms"))?;
    fs::write(root.join("forms/label.json"), FORM_JSON)?;
    fs::write(
        root.join("blanks.toml"),
        r#"
[form]
path = "forms/label.json"

[logging]
level = "debug"
ansi = false
"#,
    )?;

    let settings = Settings::from_path(root.join("blanks.toml"))?;
    assert_eq!(settings.form.path, root.join("forms/label.json"));
    assert_eq!(settings.logging.level, "debug");
    assert!(!settings.logging.ansi);

    let form = settings.load_form()?;
    let mut session = FormSession::new(&form)?;
    let change = session.set_value("labelType", serde_json::json!("currency"))?;
    assert_eq!(change.added, vec!["labelCurrency"]);
    assert_eq!(
        session.get_control("labelCurrency").unwrap().value(),
        &serde_json::json!("usd")
    );

    Ok(())
}

#[test]
fn test_same_form_in_every_format() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let from_json: FormConfig = serde_json::from_str(FORM_JSON)?;
    fs::write(root.join("form.json"), FORM_JSON)?;
    fs::write(
        root.join("form.yaml"),
        r#"
formData:
  name: { placeholder: Widget name, default: null, type: input }
  labelType:
    placeholder: Label type
    default: no-label
    type: select-with-options
    options:
      - { name: Simple, value: no-label }
      - { name: Currency, value: currency }
  labelCurrency:
    placeholder: Label currency
    default: usd
    type: select
    options:
      - { name: USD, value: usd }
formDataFillInTheBlanks:
  data:
    - { type: text, data: "Name:" }
    - type: fieldControl
      formDataPointer: name
      validators: [{ type: required }]
    - type: fieldControl
      formDataPointer: labelType
      validators: []
      nodes:
        - filter: { $in: [currency] }
          children:
            - { type: fieldControl, formDataPointer: labelCurrency, validators: [] }
"#,
    )?;

    assert_eq!(FormConfig::from_path(root.join("form.json"))?, from_json);
    assert_eq!(FormConfig::from_path(root.join("form.yaml"))?, from_json);

    fs::write(
        root.join("form.toml"),
        r#"
[formData.name]
placeholder = "Widget name"
type = "input"

[[formDataFillInTheBlanks.data]]
type = "fieldControl"
formDataPointer = "name"
validators = [{ type = "required" }]
"#,
    )?;
    let from_toml = FormConfig::from_path(root.join("form.toml"))?;
    assert_eq!(from_toml.form_data.get("name"), from_json.form_data.get("name"));

    Ok(())
}

#[test]
fn test_invalid_form_rejected_with_all_errors() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    fs::write(
        root.join("broken.yaml"),
        r#"
formData:
  name: { placeholder: Name, type: input }
formDataFillInTheBlanks:
  data:
    - type: fieldControl
      formDataPointer: title
      validators: [{ type: pattern }]
"#,
    )?;
    fs::write(
        root.join("blanks.toml"),
        "[form]\npath = \"broken.yaml\"\n",
    )?;

    let settings = Settings::from_path(root.join("blanks.toml"))?;
    let err = settings.load_form().unwrap_err().to_string();
    assert!(err.contains("unknown field 'title'"));
    assert!(err.contains("Validator of type 'pattern'"));

    Ok(())
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("form.ini");
    fs::write(&path, "").unwrap();
    assert!(FormConfig::from_path(&path).is_err());
}
