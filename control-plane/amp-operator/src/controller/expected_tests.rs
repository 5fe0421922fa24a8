#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use crate::controller::ReconcileErr;
    use crate::controller::expected::*;
    use crate::crd::api_manager::ApiManagerSpec;

    const DB_TYPES: [SystemDatabaseType; 3] = [
        SystemDatabaseType::InternalMySql,
        SystemDatabaseType::InternalPostgreSql,
        SystemDatabaseType::External,
    ];

    fn all_flag_combinations() -> Vec<DeploymentFlags> {
        let mut out = Vec::new();
        for system_database in DB_TYPES {
            for external_redis in [false, true] {
                for external_zync_database in [false, true] {
                    for zync_enabled in [false, true] {
                        out.push(DeploymentFlags {
                            system_database,
                            external_redis,
                            external_zync_database,
                            zync_enabled,
                        });
                    }
                }
            }
        }
        out
    }

    fn spec(value: serde_json::Value) -> ApiManagerSpec {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn no_duplicates_and_stable_order_for_every_combination() {
        for flags in all_flag_combinations() {
            let first = expected_deployment_names(&flags);
            let unique: HashSet<_> = first.iter().collect();
            assert_eq!(unique.len(), first.len(), "duplicates for {flags:?}");
            assert_eq!(first, expected_deployment_names(&flags));
        }
    }

    #[test]
    fn zync_names_absent_when_zync_disabled() {
        for flags in all_flag_combinations()
            .into_iter()
            .filter(|f| !f.zync_enabled)
        {
            let names = expected_deployment_names(&flags);
            for zync in [ZYNC, ZYNC_QUE, ZYNC_DATABASE] {
                assert!(!names.contains(&zync), "{zync} in {flags:?}");
            }
        }
    }

    #[test]
    fn postgresql_with_internal_stores_and_zync() {
        let flags = DeploymentFlags {
            system_database: SystemDatabaseType::InternalPostgreSql,
            external_redis: false,
            external_zync_database: false,
            zync_enabled: true,
        };
        let names = expected_deployment_names(&flags);
        assert_eq!(
            names,
            vec![
                APICAST_STAGING,
                APICAST_PRODUCTION,
                BACKEND_LISTENER,
                BACKEND_WORKER,
                BACKEND_CRON,
                SYSTEM_MEMCACHE,
                SYSTEM_APP,
                SYSTEM_SIDEKIQ,
                SYSTEM_SEARCHD,
                ZYNC,
                ZYNC_QUE,
                SYSTEM_POSTGRESQL,
                BACKEND_REDIS,
                SYSTEM_REDIS,
                ZYNC_DATABASE,
            ]
        );
        assert!(!names.contains(&SYSTEM_MYSQL));
    }

    #[test]
    fn fully_external_minimal_set() {
        let flags = DeploymentFlags {
            system_database: SystemDatabaseType::External,
            external_redis: true,
            external_zync_database: true,
            zync_enabled: true,
        };
        let names = expected_deployment_names(&flags);
        assert_eq!(names.len(), 11);
        assert!(names.contains(&ZYNC));
        assert!(!names.contains(&ZYNC_DATABASE));
        assert!(!names.contains(&SYSTEM_MYSQL));
        assert!(!names.contains(&SYSTEM_POSTGRESQL));
        assert!(!names.contains(&BACKEND_REDIS));
    }

    #[test]
    fn database_type_prints_selector_value() {
        let printed: Vec<String> = DB_TYPES.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            printed,
            vec!["internal-mysql", "internal-postgresql", "external"]
        );
    }

    #[test]
    fn flags_default_to_internal_mysql_with_zync() {
        let flags =
            DeploymentFlags::from_spec(&spec(json!({"wildcardDomain": "d"})))
                .unwrap();
        assert_eq!(
            flags,
            DeploymentFlags {
                system_database: SystemDatabaseType::InternalMySql,
                external_redis: false,
                external_zync_database: false,
                zync_enabled: true,
            }
        );
    }

    #[test]
    fn flags_follow_spec_sections() {
        let pg = DeploymentFlags::from_spec(&spec(json!({
            "wildcardDomain": "d",
            "system": {"database": {"postgresql": {}}},
            "externalComponents": {"system": {"redis": true}},
            "zync": {"enabled": false}
        })))
        .unwrap();
        assert_eq!(pg.system_database, SystemDatabaseType::InternalPostgreSql);
        assert!(pg.external_redis);
        assert!(!pg.zync_enabled);

        // External wins over an internal engine section.
        let ext = DeploymentFlags::from_spec(&spec(json!({
            "wildcardDomain": "d",
            "system": {"database": {"postgresql": {}}},
            "externalComponents": {"system": {"database": true}, "zync": {"database": true}}
        })))
        .unwrap();
        assert_eq!(ext.system_database, SystemDatabaseType::External);
        assert!(ext.external_zync_database);
    }

    #[test]
    fn both_database_engines_is_a_configuration_error() {
        let err = DeploymentFlags::from_spec(&spec(json!({
            "wildcardDomain": "d",
            "system": {"database": {"mysql": {}, "postgresql": {}}}
        })))
        .unwrap_err();
        assert!(matches!(err, ReconcileErr::Config(_)));
    }
}
