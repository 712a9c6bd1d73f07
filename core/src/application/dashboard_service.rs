//! Dashboard listing and mapping use cases.

use crate::domain::{
    canonical_port, compose_rows, DisplayRow, MappingOutcome, MappingUpdate, RowQuery,
};
use crate::error::Result;
use crate::ports::{MappingRepository, Removal, SocketEnumeratorPort};

/// Application service behind the dashboard.
///
/// Holds no state between calls: every listing re-enumerates sockets and
/// reloads the mapping.
pub struct DashboardService<S: SocketEnumeratorPort, M: MappingRepository> {
    enumerator: S,
    mappings: M,
}

impl<S: SocketEnumeratorPort, M: MappingRepository> DashboardService<S, M> {
    /// Create a new dashboard service.
    pub fn new(enumerator: S, mappings: M) -> Self {
        Self {
            enumerator,
            mappings,
        }
    }

    pub fn mappings(&self) -> &M {
        &self.mappings
    }

    /// Enumerate sockets, apply the mapping, then filter and sort per `query`.
    pub async fn rows(&self, query: &RowQuery) -> Result<Vec<DisplayRow>> {
        let sockets = self.enumerator.enumerate().await?;
        let mapping = self.mappings.load().await?;
        Ok(query.apply(compose_rows(&sockets, &mapping)))
    }

    /// Validate and apply a mapping change.
    ///
    /// Input problems come back as an outcome, not an error; only
    /// persistence failures are errors.
    pub async fn update_mapping(&self, update: &MappingUpdate) -> Result<MappingOutcome> {
        let Some(input) = update.port_input() else {
            return Ok(MappingOutcome::MissingPort);
        };
        let Ok(port) = canonical_port(input) else {
            return Ok(MappingOutcome::InvalidPort {
                input: input.to_string(),
            });
        };

        if update.is_delete() {
            return Ok(match self.mappings.remove(port).await? {
                Removal::Removed(_) => MappingOutcome::Removed { port },
                Removal::NotFound => MappingOutcome::NotFound { port },
            });
        }

        let label = update.label();
        if label.is_empty() {
            return Ok(MappingOutcome::BlankLabel);
        }

        self.mappings.upsert(port, label).await?;
        Ok(MappingOutcome::Saved {
            port,
            label: label.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MappingStore;
    use crate::domain::{ListeningSocket, PortMapping, SortKey, SortOrder};

    /// Mock enumerator for testing.
    struct MockEnumerator {
        sockets: Vec<ListeningSocket>,
    }

    impl SocketEnumeratorPort for MockEnumerator {
        async fn enumerate(&self) -> Result<Vec<ListeningSocket>> {
            Ok(self.sockets.clone())
        }
    }

    fn service(
        dir: &tempfile::TempDir,
    ) -> DashboardService<MockEnumerator, MappingStore> {
        let sockets = vec![
            ListeningSocket::listen("0.0.0.0", 22, Some(1)).with_process_name("sshd"),
            ListeningSocket::listen("127.0.0.1", 5000, Some(2)).with_process_name("python3"),
            ListeningSocket::listen("::", 1, None),
            ListeningSocket::listen("192.168.0.4", 8443, Some(3)),
        ];
        let store = MappingStore::with_path(
            dir.path().join("port_mappings.json"),
            PortMapping::defaults(1111, "Monitor de Portas (ApPortas)"),
        );
        DashboardService::new(MockEnumerator { sockets }, store)
    }

    #[tokio::test]
    async fn test_rows_merge_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        let rows = service.rows(&RowQuery::new()).await.unwrap();
        let ports: Vec<u16> = rows.iter().map(|r| r.port).collect();
        assert_eq!(ports, vec![22, 1, 5000, 8443]);

        assert_eq!(rows[0].application_name, "SSH");
        assert!(rows[0].has_custom_mapping);
        assert_eq!(rows[1].application_name, "Processo Desconhecido");
        assert_eq!(rows[1].display_address, "Localhost Amplo");
        assert_eq!(rows[2].application_name, "Processo: python3");
        assert_eq!(rows[2].display_address, "Localhost Restrito");
        assert_eq!(rows[3].application_name, "Processo Desconhecido");
    }

    #[tokio::test]
    async fn test_save_then_search() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        let outcome = service
            .update_mapping(&MappingUpdate::save("5000", "MyApp"))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            MappingOutcome::Saved {
                port: 5000,
                label: "MyApp".to_string()
            }
        );

        let rows = service
            .rows(&RowQuery::new().with_search("myapp"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].port, 5000);
        assert_eq!(rows[0].application_name, "MyApp");
        assert!(rows[0].has_custom_mapping);
    }

    #[tokio::test]
    async fn test_mapped_first_even_when_descending() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);
        service
            .update_mapping(&MappingUpdate::save("1", "Tiny"))
            .await
            .unwrap();

        let query = RowQuery::new().with_sort(SortKey::Port, SortOrder::Desc);
        let rows = service.rows(&query).await.unwrap();
        let mapped: Vec<bool> = rows.iter().map(|r| r.has_custom_mapping).collect();
        assert_eq!(mapped, vec![true, true, false, false]);

        let ports: Vec<u16> = rows.iter().map(|r| r.port).collect();
        assert_eq!(ports, vec![22, 1, 8443, 5000]);
    }

    #[tokio::test]
    async fn test_input_errors_do_not_mutate() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);
        let path = service.mappings().path().to_path_buf();

        let missing = service.update_mapping(&MappingUpdate::default()).await.unwrap();
        assert_eq!(missing, MappingOutcome::MissingPort);

        let blank = service
            .update_mapping(&MappingUpdate::save("5000", "   "))
            .await
            .unwrap();
        assert_eq!(blank, MappingOutcome::BlankLabel);

        let invalid = service
            .update_mapping(&MappingUpdate::save("http", "Web"))
            .await
            .unwrap();
        assert_eq!(
            invalid,
            MappingOutcome::InvalidPort {
                input: "http".to_string()
            }
        );

        let not_found = service
            .update_mapping(&MappingUpdate::delete("4242"))
            .await
            .unwrap();
        assert_eq!(not_found, MappingOutcome::NotFound { port: 4242 });

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_delete_ignores_blank_label() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        let outcome = service
            .update_mapping(&MappingUpdate::delete("22"))
            .await
            .unwrap();
        assert_eq!(outcome, MappingOutcome::Removed { port: 22 });

        let rows = service.rows(&RowQuery::new()).await.unwrap();
        let ssh = rows.iter().find(|r| r.port == 22).unwrap();
        assert_eq!(ssh.application_name, "Processo: sshd");
        assert!(!ssh.has_custom_mapping);
    }
}
