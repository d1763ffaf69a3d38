//! Entity catalog
//!
//! The only per-entity code in Fleetdeck: slug, title, REST path, field
//! descriptors and the searchable key set. Everything else (table pipeline,
//! exports, mutations) is generic over an [`EntityDef`].

use lazy_static::lazy_static;
use serde::Serialize;

use crate::fields::{kind_matches, FieldDescriptor};
use crate::record::Record;

/// Static configuration binding one entity to the engine.
#[derive(Debug, Clone, Serialize)]
pub struct EntityDef {
    /// URL-safe identifier (`drivers`, `vehicle-types`, ...).
    pub slug: &'static str,
    /// Title used in the dashboard and report headers.
    pub title: &'static str,
    /// Path of the backing REST collection.
    pub path: &'static str,
    pub fields: Vec<FieldDescriptor>,
    /// Keys matched by the free-text search. Empty means "every top-level
    /// value" (the loose variant).
    pub searchable: Vec<String>,
}

impl EntityDef {
    /// Check a fetched snapshot against the declared field kinds. Mismatches
    /// are logged, never fatal; the API stays the source of truth.
    pub fn validate_records(&self, records: &[Record]) {
        for (i, record) in records.iter().enumerate() {
            for field in &self.fields {
                if let Some(value) = record.get_path(&field.key) {
                    if !kind_matches(value, field.kind) {
                        log::warn!(
                            "⚠️ {}[{}].{}: value {} does not look like {:?}",
                            self.slug,
                            i,
                            field.key,
                            value,
                            field.kind
                        );
                    }
                }
            }
        }
    }
}

fn keys(ks: &[&str]) -> Vec<String> {
    ks.iter().map(|s| s.to_string()).collect()
}

fn drivers() -> EntityDef {
    EntityDef {
        slug: "drivers",
        title: "Drivers",
        path: "/api/drivers",
        fields: vec![
            FieldDescriptor::text("name", "Driver Name"),
            FieldDescriptor::text("phone", "Phone"),
            FieldDescriptor::text("license_number", "License No."),
            FieldDescriptor::date("license_expiry", "License Expiry"),
            FieldDescriptor::text("region", "Region"),
            FieldDescriptor::text("district", "District"),
            FieldDescriptor::text("vehicles.reg_number", "Assigned Vehicle"),
            FieldDescriptor::status("status", "Status"),
            FieldDescriptor::datetime("created_at", "Created"),
            FieldDescriptor::text("created_by", "Created By"),
        ],
        searchable: keys(&["name", "phone", "license_number", "region", "district", "status"]),
    }
}

fn vehicles() -> EntityDef {
    EntityDef {
        slug: "vehicles",
        title: "Vehicles",
        path: "/api/vehicles",
        fields: vec![
            FieldDescriptor::text("reg_number", "Reg. Number"),
            FieldDescriptor::text("vehicle_types.type_label", "Type"),
            FieldDescriptor::text("vehicle_makes.name", "Make"),
            FieldDescriptor::text("vehicle_models.name", "Model"),
            FieldDescriptor::number("year", "Year"),
            FieldDescriptor::text("clusters.name", "Cluster"),
            FieldDescriptor::text("subsidiaries.name", "Subsidiary"),
            FieldDescriptor::status("status", "Status"),
            FieldDescriptor::datetime("created_at", "Created"),
        ],
        searchable: keys(&["reg_number", "vehicle_makes.name", "vehicle_models.name", "status"]),
    }
}

fn vehicle_types() -> EntityDef {
    EntityDef {
        slug: "vehicle-types",
        title: "Vehicle Types",
        path: "/api/vehicle_types",
        fields: vec![
            FieldDescriptor::text("type_label", "Type"),
            FieldDescriptor::text("description", "Description"),
            FieldDescriptor::datetime("created_at", "Created"),
            FieldDescriptor::text("created_by", "Created By"),
        ],
        searchable: keys(&["type_label", "description"]),
    }
}

fn vehicle_makes() -> EntityDef {
    EntityDef {
        slug: "vehicle-makes",
        title: "Vehicle Makes",
        path: "/api/vehicle_makes",
        fields: vec![
            FieldDescriptor::text("name", "Make"),
            FieldDescriptor::text("description", "Description"),
            FieldDescriptor::datetime("created_at", "Created"),
        ],
        searchable: keys(&["name", "description"]),
    }
}

fn vehicle_models() -> EntityDef {
    EntityDef {
        slug: "vehicle-models",
        title: "Vehicle Models",
        path: "/api/vehicle_models",
        fields: vec![
            FieldDescriptor::text("name", "Model"),
            FieldDescriptor::text("vehicle_makes.name", "Make"),
            FieldDescriptor::text("description", "Description"),
            FieldDescriptor::datetime("created_at", "Created"),
        ],
        searchable: keys(&["name", "vehicle_makes.name"]),
    }
}

fn repairs() -> EntityDef {
    EntityDef {
        slug: "repairs",
        title: "Repair Requests",
        path: "/api/repairs",
        fields: vec![
            FieldDescriptor::text("vehicles.reg_number", "Vehicle"),
            FieldDescriptor::text("description", "Description"),
            FieldDescriptor::currency("cost", "Cost"),
            FieldDescriptor::date("requested_at", "Requested"),
            FieldDescriptor::status("status", "Status"),
            FieldDescriptor::text("created_by", "Requested By"),
        ],
        searchable: keys(&["vehicles.reg_number", "description", "status"]),
    }
}

fn repair_schedules() -> EntityDef {
    EntityDef {
        slug: "repair-schedules",
        title: "Repair Schedules",
        path: "/api/repair_schedules",
        fields: vec![
            FieldDescriptor::date("scheduled_date", "Scheduled"),
            FieldDescriptor::text("mechanics.name", "Technician"),
            FieldDescriptor::text("repairs.description", "Repair Request"),
            FieldDescriptor::text("vehicles.reg_number", "Vehicle"),
            FieldDescriptor::status("status", "Status"),
        ],
        searchable: keys(&["mechanics.name", "vehicles.reg_number", "status"]),
    }
}

fn insurance() -> EntityDef {
    EntityDef {
        slug: "insurance",
        title: "Insurance Policies",
        path: "/api/insurance",
        fields: vec![
            FieldDescriptor::text("policy_number", "Policy No."),
            FieldDescriptor::text("company", "Company"),
            FieldDescriptor::text("vehicles.reg_number", "Vehicle"),
            FieldDescriptor::date("coverage_start", "Coverage Start"),
            FieldDescriptor::date("coverage_end", "Coverage End"),
            FieldDescriptor::currency("premium", "Premium"),
            FieldDescriptor::status("status", "Status"),
        ],
        searchable: keys(&["policy_number", "company", "vehicles.reg_number", "status"]),
    }
}

fn users() -> EntityDef {
    EntityDef {
        slug: "users",
        title: "Users",
        path: "/api/users",
        fields: vec![
            FieldDescriptor::text("name", "Name"),
            FieldDescriptor::text("email", "Email"),
            FieldDescriptor::text("role", "Role"),
            FieldDescriptor::status("status", "Status"),
            FieldDescriptor::datetime("created_at", "Created"),
        ],
        searchable: keys(&["name", "email", "role", "status"]),
    }
}

fn mechanics() -> EntityDef {
    EntityDef {
        slug: "mechanics",
        title: "Mechanics",
        path: "/api/mechanics",
        fields: vec![
            FieldDescriptor::text("name", "Name"),
            FieldDescriptor::text("phone", "Phone"),
            FieldDescriptor::text("specialty", "Specialty"),
            FieldDescriptor::status("status", "Status"),
        ],
        searchable: keys(&["name", "phone", "specialty"]),
    }
}

fn clusters() -> EntityDef {
    EntityDef {
        slug: "clusters",
        title: "Clusters",
        path: "/api/clusters",
        fields: vec![
            FieldDescriptor::text("name", "Cluster"),
            FieldDescriptor::text("description", "Description"),
            FieldDescriptor::datetime("created_at", "Created"),
        ],
        searchable: keys(&["name", "description"]),
    }
}

fn subsidiaries() -> EntityDef {
    EntityDef {
        slug: "subsidiaries",
        title: "Subsidiaries",
        path: "/api/subsidiaries",
        fields: vec![
            FieldDescriptor::text("name", "Subsidiary"),
            FieldDescriptor::text("location", "Location"),
            FieldDescriptor::text("description", "Description"),
            FieldDescriptor::datetime("created_at", "Created"),
        ],
        searchable: keys(&["name", "location"]),
    }
}

lazy_static! {
    /// Every entity the dashboard manages.
    pub static ref CATALOG: Vec<EntityDef> = vec![
        drivers(),
        vehicles(),
        vehicle_types(),
        vehicle_makes(),
        vehicle_models(),
        repairs(),
        repair_schedules(),
        insurance(),
        users(),
        mechanics(),
        clusters(),
        subsidiaries(),
    ];
}

/// Look an entity up by its slug.
pub fn find(slug: &str) -> Option<&'static EntityDef> {
    CATALOG.iter().find(|e| e.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_are_unique() {
        let mut slugs: Vec<&str> = CATALOG.iter().map(|e| e.slug).collect();
        slugs.sort_unstable();
        let count = slugs.len();
        slugs.dedup();
        assert_eq!(slugs.len(), count);
    }

    #[test]
    fn test_searchable_keys_resolve_against_fields() {
        for entity in CATALOG.iter() {
            for key in &entity.searchable {
                assert!(
                    entity.fields.iter().any(|f| &f.key == key),
                    "{}: searchable key {} has no descriptor",
                    entity.slug,
                    key
                );
            }
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(find("drivers").map(|e| e.title), Some("Drivers"));
        assert!(find("ghosts").is_none());
    }

    #[test]
    fn test_every_entity_has_searchable_fields() {
        for entity in CATALOG.iter() {
            assert!(!entity.fields.is_empty(), "{} has no fields", entity.slug);
            assert!(!entity.searchable.is_empty(), "{} has no searchable keys", entity.slug);
        }
    }
}
