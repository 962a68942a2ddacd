use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use model_export::{ExportError, Fields, Model};
use serde_json::json;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

struct Owner {
    name: String,
    hook_calls: u32,
}

impl Owner {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            hook_calls: 0,
        }
    }
}

impl Model for Owner {
    fn export_fields(&mut self, fields: &mut Fields<'_, '_>) -> model_export::Result<()> {
        fields.field("name", &mut self.name)?;
        Ok(())
    }

    fn pre_output(&mut self) -> model_export::Result<()> {
        self.hook_calls += 1;
        Ok(())
    }
}

struct Listing {
    id: i64,
    secret: String,
    created_at: NaiveDateTime,
    owner: Owner,
}

impl Model for Listing {
    fn export_fields(&mut self, fields: &mut Fields<'_, '_>) -> model_export::Result<()> {
        fields
            .field("id", &mut self.id)?
            .field("_secret", &mut self.secret)?
            .field("createdAt", &mut self.created_at)?
            .field("owner", &mut self.owner)?;
        Ok(())
    }
}

/// 基本情境：私有欄位、日期與巢狀模型
#[test]
fn test_listing_scenario() -> Result<()> {
    let mut listing = Listing {
        id: 7,
        secret: "x".to_string(),
        created_at: at(2023, 1, 1, 0, 0, 0),
        owner: Owner::new("Al"),
    };

    let value = listing.json_serialize()?;
    assert_eq!(
        value,
        json!({"id": 7, "createdAt": "2023-01-01 00:00:00", "owner": {"name": "Al"}})
    );

    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["id", "createdAt", "owner"]);
    Ok(())
}

struct Flat {
    count: u32,
    ratio: f64,
    label: String,
    active: bool,
    note: Option<String>,
    internal: u32,
}

impl Model for Flat {
    fn export_fields(&mut self, fields: &mut Fields<'_, '_>) -> model_export::Result<()> {
        fields.field("count", &mut self.count)?;
        fields.field("ratio", &mut self.ratio)?;
        fields.field("label", &mut self.label)?;
        fields.field("active", &mut self.active)?;
        fields.field("note", &mut self.note)?;
        fields.field("_internal", &mut self.internal)?;
        fields.field("__internal", &mut self.internal)?;
        Ok(())
    }
}

#[test]
fn test_primitive_fields_unchanged() -> Result<()> {
    let mut flat = Flat {
        count: 3,
        ratio: 0.5,
        label: "abc".to_string(),
        active: false,
        note: None,
        internal: 99,
    };

    let map = flat.to_map()?;
    assert_eq!(map.len(), 5);
    assert_eq!(
        serde_json::Value::Object(map),
        json!({"count": 3, "ratio": 0.5, "label": "abc", "active": false, "note": null})
    );
    Ok(())
}

#[test]
fn test_idempotent_without_hook() -> Result<()> {
    let mut flat = Flat {
        count: 1,
        ratio: 1.25,
        label: "same".to_string(),
        active: true,
        note: Some("n".to_string()),
        internal: 0,
    };

    let first = flat.to_map()?;
    let second = flat.to_map()?;
    assert_eq!(first, second);
    Ok(())
}

struct Basket {
    items: Vec<i64>,
    total: Option<i64>,
}

impl Model for Basket {
    fn export_fields(&mut self, fields: &mut Fields<'_, '_>) -> model_export::Result<()> {
        fields.field("items", &mut self.items)?;
        fields.field("total", &mut self.total)?;
        Ok(())
    }

    fn pre_output(&mut self) -> model_export::Result<()> {
        self.total = Some(self.items.iter().sum());
        Ok(())
    }
}

#[test]
fn test_hook_computes_total() -> Result<()> {
    let mut basket = Basket {
        items: vec![2, 3, 5],
        total: None,
    };

    let value = basket.json_serialize()?;
    assert_eq!(value, json!({"items": [2, 3, 5], "total": 10}));
    assert_eq!(basket.total, Some(10));
    Ok(())
}

struct Team {
    members: Vec<Owner>,
    lead: Owner,
}

impl Model for Team {
    fn export_fields(&mut self, fields: &mut Fields<'_, '_>) -> model_export::Result<()> {
        fields.field("lead", &mut self.lead)?;
        fields.field("members", &mut self.members)?;
        Ok(())
    }
}

#[test]
fn test_nested_models_match_their_own_export() -> Result<()> {
    let mut team = Team {
        members: vec![Owner::new("Bo"), Owner::new("Cy"), Owner::new("Di")],
        lead: Owner::new("Al"),
    };

    let value = team.json_serialize()?;
    let mut lead = Owner::new("Al");
    assert_eq!(value["lead"], lead.json_serialize()?);
    assert_eq!(
        value["members"],
        json!([{"name": "Bo"}, {"name": "Cy"}, {"name": "Di"}])
    );
    Ok(())
}

#[test]
fn test_hook_runs_once_per_model() -> Result<()> {
    let mut team = Team {
        members: vec![Owner::new("Bo"), Owner::new("Cy")],
        lead: Owner::new("Al"),
    };

    team.to_map()?;
    assert_eq!(team.lead.hook_calls, 1);
    assert!(team.members.iter().all(|m| m.hook_calls == 1));

    team.to_map()?;
    assert_eq!(team.lead.hook_calls, 2);
    Ok(())
}

struct Ledger {
    entries: Vec<(i64, NaiveDateTime)>,
    opened: NaiveDateTime,
}

impl Model for Ledger {
    fn export_fields(&mut self, fields: &mut Fields<'_, '_>) -> model_export::Result<()> {
        fields.field("opened", &mut self.opened)?;
        let mut stamps: Vec<NaiveDateTime> = self.entries.iter().map(|(_, at)| *at).collect();
        fields.field("stamps", &mut stamps)?;
        fields.computed("balance", self.entries.iter().map(|(v, _)| v).sum::<i64>())?;
        Ok(())
    }
}

#[test]
fn test_dates_inside_sequences_and_computed_fields() -> Result<()> {
    let mut ledger = Ledger {
        entries: vec![(5, at(2024, 3, 5, 9, 7, 0)), (-2, at(2024, 3, 6, 13, 0, 9))],
        opened: at(2024, 1, 1, 8, 0, 0),
    };

    let value = ledger.json_serialize()?;
    assert_eq!(
        value,
        json!({
            "opened": "2024-01-01 08:00:00",
            "stamps": ["2024-03-05 09:07:00", "2024-03-06 13:00:09"],
            "balance": 3
        })
    );
    Ok(())
}

struct Failing;

impl Model for Failing {
    fn export_fields(&mut self, _fields: &mut Fields<'_, '_>) -> model_export::Result<()> {
        Ok(())
    }

    fn pre_output(&mut self) -> model_export::Result<()> {
        Err(ExportError::hook::<Self>("upstream unavailable"))
    }
}

struct Wrapper {
    inner: Failing,
}

impl Model for Wrapper {
    fn export_fields(&mut self, fields: &mut Fields<'_, '_>) -> model_export::Result<()> {
        fields.field("inner", &mut self.inner)?;
        Ok(())
    }
}

#[test]
fn test_hook_error_propagates_unchanged() {
    let mut wrapper = Wrapper { inner: Failing };

    match wrapper.to_map() {
        Err(ExportError::HookError { model, message }) => {
            assert!(model.ends_with("Failing"));
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("expected hook error, got {:?}", other),
    }
}

struct Summary {
    title: String,
    hidden: bool,
}

impl Model for Summary {
    fn export_fields(&mut self, fields: &mut Fields<'_, '_>) -> model_export::Result<()> {
        assert!(fields.is_empty());
        fields.field("title", &mut self.title)?;
        fields.field("_hidden", &mut self.hidden)?;

        // private fields are not counted
        let exported = fields.len();
        fields.computed("field_count", exported)?;
        Ok(())
    }
}

#[test]
fn test_field_count_excludes_private_fields() -> Result<()> {
    let mut summary = Summary {
        title: "Weekly".to_string(),
        hidden: true,
    };

    assert_eq!(
        summary.json_serialize()?,
        json!({"title": "Weekly", "field_count": 1})
    );
    Ok(())
}
