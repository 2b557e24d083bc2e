//! Input record shapes
//!
//! Policy exports come in two shapes:
//!
//! - **Flat**: definition fields at the top level (`id`, `displayName`,
//!   `metadata.category`, `policyRule`, `versions`, ...)
//! - **Wrapped**: an ARM resource envelope (`name`, `id`, `type`, `location`)
//!   with the definition under `properties`
//!
//! Both map into the same [`RecordFields`].

use serde_json::Value;

use crate::lookup::Lookup;

/// One policy-definition element of an upload
///
/// Both variants only ever hold JSON objects.
#[derive(Debug, Clone, Copy)]
pub enum PolicyRecord<'a> {
    /// Definition fields at the top level
    Flat(&'a Value),
    /// Resource envelope with a nested `properties` object
    Wrapped {
        envelope: &'a Value,
        properties: &'a Value,
    },
}

/// The common field set both shapes map into
///
/// Each field is a cursor; absent fields read as defaults when formatted.
#[derive(Debug, Clone, Copy)]
pub struct RecordFields<'a> {
    pub name: Lookup<'a>,
    pub id: Lookup<'a>,
    pub resource_type: Lookup<'a>,
    pub location: Lookup<'a>,
    pub display_name: Lookup<'a>,
    pub description: Lookup<'a>,
    pub category: Lookup<'a>,
    pub policy_type: Lookup<'a>,
    pub mode: Lookup<'a>,
    pub condition: Lookup<'a>,
    pub action: Lookup<'a>,
    pub effect: Lookup<'a>,
    pub parameters: Lookup<'a>,
    pub versions: Lookup<'a>,
}

impl<'a> PolicyRecord<'a> {
    /// Detect the shape of an element; `None` when it is not an object
    pub fn detect(value: &'a Value) -> Option<Self> {
        let object = value.as_object()?;
        match object.get("properties").filter(|p| p.is_object()) {
            Some(properties) => Some(PolicyRecord::Wrapped {
                envelope: value,
                properties,
            }),
            None => Some(PolicyRecord::Flat(value)),
        }
    }

    /// Short shape name, used in logs
    pub fn shape(&self) -> &'static str {
        match self {
            PolicyRecord::Flat(_) => "flat",
            PolicyRecord::Wrapped { .. } => "wrapped",
        }
    }

    /// Map this record into the common field set
    pub fn fields(&self) -> RecordFields<'a> {
        match *self {
            PolicyRecord::Flat(object) => {
                let root = Lookup::new(object);
                Self::definition_fields(root, root)
            }
            PolicyRecord::Wrapped {
                envelope,
                properties,
            } => {
                let envelope = Lookup::new(envelope);
                let body = Lookup::new(properties);
                let mut fields = Self::definition_fields(envelope, body);
                // Resource identity lives on the envelope; fall back to the body
                fields.id = envelope.get("id").or(body.get("id"));
                fields.location = envelope.get("location").or(body.get("location"));
                fields
            }
        }
    }

    fn definition_fields(envelope: Lookup<'a>, body: Lookup<'a>) -> RecordFields<'a> {
        let rule = body.get("policyRule");
        RecordFields {
            name: envelope.get("name"),
            id: body.get("id"),
            resource_type: envelope.get("type"),
            location: body.get("location"),
            display_name: body.get("displayName"),
            description: body.get("description"),
            category: body.path(&["metadata", "category"]),
            policy_type: body.get("policyType"),
            mode: body.get("mode"),
            condition: rule.get("if"),
            action: rule.get("then"),
            effect: rule.path(&["then", "effect"]),
            parameters: body.get("parameters"),
            versions: body.get("versions"),
        }
    }
}
