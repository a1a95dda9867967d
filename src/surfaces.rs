//! The two list surfaces of the portal.
//!
//! Both are the same [`RecordTable`] engine, configured with their record
//! type, searchable fields and export columns.

use crate::config::{ResolvedConfig, SurfaceConfig};
use crate::export::{ColumnSpec, DirectorySink};
use crate::model::{PortalUser, PortalUserField, StaffForm, StaffFormField};
use crate::state::{RecordTable, TableSettings};

/// Export columns of the staff-forms list.
pub fn staff_form_columns() -> ColumnSpec<StaffForm> {
    ColumnSpec::new()
        .field("Staff Number", StaffFormField::StaffNumber)
        .field("Full Name", StaffFormField::FullName)
        .field("Email", StaffFormField::Email)
        .field("Phone", StaffFormField::Phone)
        .field("Department", StaffFormField::Department)
        .field("Designation", StaffFormField::Designation)
        .field("Status", StaffFormField::Status)
        .field("Submitted On", StaffFormField::SubmittedOn)
}

/// Export columns of the user-management list.
pub fn portal_user_columns() -> ColumnSpec<PortalUser> {
    ColumnSpec::new()
        .field("Username", PortalUserField::Username)
        .field("Full Name", PortalUserField::FullName)
        .field("Email", PortalUserField::Email)
        .field("Role", PortalUserField::Role)
        .field("Status", PortalUserField::Status)
}

fn settings<R: crate::model::Record>(
    config: &ResolvedConfig,
    surface: &SurfaceConfig,
    search_fields: &[R::Field],
    columns: ColumnSpec<R>,
) -> TableSettings<R> {
    TableSettings::new(surface.dataset_name.clone(), search_fields.to_vec(), columns)
        .with_page_size(surface.page_size)
        .with_page_size_options(config.page_size_options.clone())
        .with_notice_capacity(config.notice_capacity)
}

/// The staff-forms list engine.
pub fn staff_forms_table(config: &ResolvedConfig) -> RecordTable<StaffForm> {
    RecordTable::new(settings(
        config,
        &config.forms,
        StaffFormField::DEFAULT_SEARCH,
        staff_form_columns(),
    ))
}

/// The user-management list engine.
pub fn portal_users_table(config: &ResolvedConfig) -> RecordTable<PortalUser> {
    RecordTable::new(settings(
        config,
        &config.users,
        PortalUserField::DEFAULT_SEARCH,
        portal_user_columns(),
    ))
}

/// Sink writing exports into the configured directory.
pub fn export_sink(config: &ResolvedConfig) -> DirectorySink {
    DirectorySink::new(config.export_dir.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{ExportOutcome, MemorySink};
    use crate::model::UserRole;
    use crate::source::MemoryBackend;
    use crate::state::PageSize;
    use crate::test_harness::{form, user};
    use chrono::NaiveDate;

    #[test]
    fn tables_follow_surface_config() {
        let mut config = ResolvedConfig::default();
        config.forms.page_size = PageSize::new(25).unwrap();
        config.users.dataset_name = "accounts".to_string();

        let forms = staff_forms_table(&config);
        let users = portal_users_table(&config);

        assert_eq!(forms.page_size().get(), 25);
        assert_eq!(forms.exporter().dataset_name(), "staff-forms");
        assert_eq!(users.exporter().dataset_name(), "accounts");
    }

    #[test]
    fn tables_offer_configured_page_sizes() {
        let mut config = ResolvedConfig::default();
        config.page_size_options = vec![PageSize::new(20).unwrap(), PageSize::new(40).unwrap()];

        let mut forms = staff_forms_table(&config);

        let sizes: Vec<usize> = forms.page_size_options().iter().map(|s| s.get()).collect();
        assert_eq!(sizes, vec![10, 20, 40]);
        assert!(forms.set_page_size(PageSize::new(40).unwrap()));
        assert!(!forms.set_page_size(PageSize::new(25).unwrap()));
        assert_eq!(forms.page_size().get(), 40);
    }

    #[test]
    fn export_sink_writes_into_configured_directory() {
        let mut config = ResolvedConfig::default();
        config.export_dir = std::path::PathBuf::from("/srv/exports");

        assert_eq!(export_sink(&config).dir(), std::path::Path::new("/srv/exports"));
        assert_eq!(
            export_sink(&ResolvedConfig::default()).dir(),
            crate::config::loader::default_export_dir()
        );
    }

    #[test]
    fn staff_form_export_has_every_column() {
        let mut table = staff_forms_table(&ResolvedConfig::default());
        table.refresh(&mut MemoryBackend::new(vec![form(1, "Ada Obi", "HR")]));
        let mut sink = MemorySink::new();

        table
            .export_on(&mut sink, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
            .unwrap();

        insta::assert_snapshot!(sink.last_text().unwrap().trim_end(), @r###"
        "Staff Number","Full Name","Email","Phone","Department","Designation","Status","Submitted On"
        "S-001","Ada Obi","staff1@example.org","","HR","Officer","pending","2024-01-01"
        "###);
    }

    #[test]
    fn users_search_by_username() {
        let mut table = portal_users_table(&ResolvedConfig::default());
        table.refresh(&mut MemoryBackend::new(vec![
            user(1, "aobi", UserRole::Admin),
            user(2, "bkent", UserRole::Staff),
        ]));

        table.set_search_text("KENT");

        assert_eq!(table.filtered_len(), 1);
        let outcome = table.export_on(
            &mut MemorySink::new(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        );
        assert!(matches!(
            outcome,
            Ok(ExportOutcome::Delivered { rows: 1, .. })
        ));
    }
}
