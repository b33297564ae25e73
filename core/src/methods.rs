//! Bindings for every vendor method.
//!
//! Each binding forwards its arguments to `invoke` under the vendor's key
//! names. Required arguments are positional; optional ones are `Option`s and
//! go out as the unset sentinel when `None`. The table below is the single
//! source of those names: `fn rust_name = "wireName"(required; optional)`,
//! each argument written `name: Type => "wire_key"`. An optional argument
//! suffixed `as flag` goes out as `1`/`0` instead of `true`/`false`.

use serde_json::Value;

use crate::client::SpySerpClient;
use crate::error::ApiError;
use crate::params::{flag, Params};
use crate::transport::Transport;
use crate::types::{DomainType, KeywordRename, StatisticOptions};

macro_rules! api_methods {
    ($(
        $(#[$meta:meta])*
        fn $name:ident = $wire:literal (
            $($req:ident: $req_ty:ty => $req_key:literal),*
            $(; $($opt:ident: $opt_ty:ty => $opt_key:literal $(as $enc:ident)?),*)?
        );
    )*) => {
        impl<T: Transport> SpySerpClient<T> {
            $(
                $(#[$meta])*
                #[doc = ""]
                #[doc = concat!("Vendor method `", $wire, "`.")]
                #[allow(clippy::too_many_arguments)]
                pub fn $name(
                    &self,
                    $($req: $req_ty,)*
                    $($($opt: Option<$opt_ty>,)*)?
                ) -> Result<Value, ApiError> {
                    let params = Params::new()
                        $(.required($req_key, $req))*
                        $($(.optional($opt_key, $opt $(.map($enc))?))*)?;
                    self.invoke($wire, params)
                }
            )*
        }
    };
}

api_methods! {
    // Account and reference data

    /// All search engines, with their setting values when asked.
    fn search_engines = "searchEngines"(; with_setting_values: bool => "withSettingValues");

    /// Values of a search engine setting with many choices, such as
    /// `google_location`, filtered by `search`.
    fn search_engines_load_settings = "searchEnginesLoadSettings"(key: &str => "key"; search: &str => "search");

    /// Allowed conformity types for Yandex frequency collection.
    fn project_frequency_yandex_conformity = "projectFrequencyYandexConformity"();

    /// Current balance in every currency the account uses.
    fn balance = "balance"();

    fn projects = "projects"();

    fn messages = "messages"(; page: u32 => "page", page_size: u32 => "pageSize");

    /// Last schedules of all projects.
    fn timeline = "timeline"();

    /// The account's current package.
    fn package = "package"();

    fn limits = "limits"();

    /// Limit named `limit` as applied to one project.
    fn limit = "limit"(limit: &str => "limit", project_id: u64 => "project_id");

    /// Projects other users shared with this account.
    fn shared_projects = "sharedProjects"();

    // Projects

    fn project = "project"(project_id: u64 => "project_id");

    /// Create a project, inside an existing group when `group_id` is given.
    fn project_create = "projectCreate"(name: &str => "name"; group_id: u64 => "group_id");

    fn project_delete = "projectDelete"(project_id: u64 => "project_id");

    fn project_disable = "projectDisable"(project_id: u64 => "project_id");

    fn project_group_change = "projectGroupChange"(
        project_id: u64 => "project_id",
        group_id: u64 => "group_id"
    );

    fn project_rename = "projectRename"(project_id: u64 => "project_id", name: &str => "name");

    /// Account-wide project settings.
    fn projects_settings = "projectsSettings"();

    fn projects_settings_change = "projectsSettingsChange"(setting: &str => "setting", value: &str => "value");

    fn projects_setting_values = "projectsSettingValues"(setting: &str => "setting");

    /// Save one setting of a single project.
    fn project_save_setting = "projectSaveSetting"(
        project_id: u64 => "project_id",
        setting: &str => "setting",
        value: &Value => "value"
    );

    // Project groups

    fn groups = "groups"(; page: u32 => "page", page_size: u32 => "pageSize");

    fn group_add = "groupAdd"(group: &str => "group");

    fn group_delete = "groupDelete"(group_id: u64 => "groupId");

    fn group_update = "groupUpdate"(group_id: u64 => "groupId", group_name: &str => "groupName");

    // Search engines of a project

    fn project_search_engines = "projectSearchEngines"(project_id: u64 => "project_id");

    fn project_search_engine = "projectSearchEngine"(
        project_id: u64 => "project_id",
        project_se_id: u64 => "project_se_id"
    );

    /// Attach search engines; `engines` is the vendor's list of engine
    /// descriptions with their settings.
    fn project_search_engines_add = "projectSearchEnginesAdd"(
        project_id: u64 => "project_id",
        engines: &Value => "engines"
    );

    /// Detach a search engine. `relation_id` comes from
    /// `project_search_engines`.
    fn project_search_engines_delete = "projectSearchEnginesDelete"(
        project_id: u64 => "project_id",
        relation_id: u64 => "relation_id"
    );

    fn project_search_engines_edit = "projectSearchEnginesEdit"(
        project_id: u64 => "project_id",
        engine_id: u64 => "engine_id",
        settings: &Value => "settings"
    );

    // Domains

    /// Domains of a project, only those of type `is_own` when given.
    fn project_domains = "projectDomains"(
        project_id: u64 => "project_id";
        page: u32 => "page",
        page_size: u32 => "pageSize",
        is_own: DomainType => "is_own"
    );

    fn project_domains_add = "projectDomainsAdd"(project_id: u64 => "project_id", domains: &[&str] => "domains");

    fn project_domains_delete = "projectDomainsDelete"(
        project_id: u64 => "project_id",
        domain_ids: &[u64] => "domain_ids"
    );

    fn project_domains_change_type = "projectDomainsChangeType"(
        project_id: u64 => "project_id",
        domain_ids: &[u64] => "domain_ids";
        domain_type: DomainType => "type"
    );

    /// Collect competitor domains from the project's statistics.
    fn project_domains_collect = "projectDomainsCollect"(project_id: u64 => "project_id");

    // Keywords

    fn project_keywords = "projectKeywords"(
        project_id: u64 => "project_id";
        category_id: u64 => "category_id",
        with_columns: bool => "withColumns" as flag,
        page: u32 => "page",
        page_size: u32 => "pageSize",
        key_ids: &[u64] => "key_ids",
        search: &str => "search"
    );

    /// Add up to 1000 keywords. With `skip_failed`, invalid keywords are
    /// dropped instead of failing the whole call.
    fn project_keywords_add = "projectKeywordsAdd"(
        project_id: u64 => "project_id",
        keywords: &[&str] => "keywords";
        category_id: u64 => "category_id",
        skip_failed: bool => "skipFailed" as flag
    );

    fn project_keywords_delete = "projectKeywordsDelete"(
        project_id: u64 => "project_id",
        keyword_ids: &[u64] => "keyword_ids"
    );

    fn project_keywords_rename = "projectKeywordsRename"(
        project_id: u64 => "project_id",
        keywords: &[KeywordRename] => "keywords"
    );

    fn project_keywords_change_category = "projectKeywordsChangeCategory"(
        project_id: u64 => "project_id",
        keyword_ids: &[u64] => "keyword_ids",
        category_id: u64 => "category_id"
    );

    /// Update custom column values of keywords.
    fn project_keywords_columns_edit = "projectKeywordsColumnsEdit"(
        project_id: u64 => "project_id",
        keywords: &Value => "keywords"
    );

    fn project_keywords_delete_all = "projectKeywordsDeleteAll"(project_id: u64 => "project_id");

    /// All result links for one keyword, schedule and search engine.
    fn project_keywords_pick = "projectKeywordsPick"(
        project_id: u64 => "project_id",
        key: u64 => "key",
        schedule_id: u64 => "schedule_id",
        se: u64 => "se"
    );

    // Keyword categories

    fn project_categories = "projectCategories"(
        project_id: u64 => "project_id";
        page: u32 => "page",
        page_size: u32 => "pageSize"
    );

    fn project_categories_add = "projectCategoriesAdd"(
        project_id: u64 => "project_id",
        categories: &[&str] => "categories"
    );

    fn project_categories_delete = "projectCategoriesDelete"(
        project_id: u64 => "project_id",
        category_ids: &[u64] => "category_ids"
    );

    /// Rename a category; `default_category` makes it the project default.
    /// The new title is sent under the key `category`.
    fn project_categories_edit = "projectCategoriesEdit"(
        project_id: u64 => "project_id",
        category_id: u64 => "category_id",
        category_title: &str => "category";
        default_category: bool => "default_category" as flag
    );

    // Custom columns

    fn project_columns = "projectColumns"(
        project_id: u64 => "project_id";
        page: u32 => "page",
        page_size: u32 => "pageSize",
        with_filled: bool => "withFilled" as flag
    );

    fn project_columns_add = "projectColumnsAdd"(project_id: u64 => "project_id", column: &Value => "column");

    /// Columns that exist in other projects or are common, and can be added.
    fn project_columns_available = "projectColumnsAvailable"(project_id: u64 => "project_id");

    fn project_columns_delete = "projectColumnsDelete"(
        project_id: u64 => "project_id",
        column_id: u64 => "column_id"
    );

    fn project_columns_edit = "projectColumnsEdit"(
        project_id: u64 => "project_id",
        column_id: u64 => "column_id",
        column: &Value => "column"
    );

    /// Hide a column on the statistics page.
    fn project_columns_hide = "projectColumnsHide"(
        project_id: u64 => "project_id",
        column_id: u64 => "column_id"
    );

    /// Start collecting relevant URLs, or frequencies for a frequency column.
    fn project_columns_autocollect = "projectColumnsAutocollect"(
        project_id: u64 => "project_id",
        column_id: u64 => "column_id"
    );

    // Schedules

    /// Schedules of a project, newest first.
    fn project_schedules = "projectSchedules"(
        project_id: u64 => "project_id";
        page: u32 => "page",
        page_size: u32 => "pageSize"
    );

    fn project_schedule = "projectSchedule"(project_id: u64 => "project_id", schedule_id: u64 => "schedule_id");

    /// Schedules being processed right now.
    fn project_active_schedule = "projectActiveSchedule"(project_id: u64 => "project_id");

    /// Tasks being processed right now.
    fn project_active_tasks = "projectActiveTasks"(project_id: u64 => "project_id");

    // Sharing

    fn project_shared_emails = "projectSharedEmails"(project_id: u64 => "project_id");

    /// Create a new public URL for the project.
    fn project_shared_url_create = "projectSharedUrlCreate"(project_id: u64 => "project_id");

    fn project_shared_url_get = "projectSharedUrlGet"(project_id: u64 => "project_id");

    fn project_shared_user = "projectSharedUser"(project_id: u64 => "project_id", email: &str => "email");

    fn project_shared_user_delete = "projectSharedUserDelete"(
        project_id: u64 => "project_id",
        user_id: u64 => "user_id"
    );

    // Yandex frequencies

    /// Start collecting Yandex frequencies. `category` of `-1` covers all
    /// categories; `skip_exist` leaves keywords that already have data.
    fn project_frequency_yandex_run = "projectFrequencyYandexRun"(
        project_id: u64 => "project_id",
        conformities: &Value => "conformities",
        category: i64 => "category";
        regions: &[u64] => "regions",
        skip_exist: bool => "skipExist" as flag
    );

    fn project_frequency_columns = "projectFrequencyColumns"(project_id: u64 => "project_id");

    fn project_frequency_yandex_regions = "projectFrequencyYandexRegions"(project_id: u64 => "project_id");

    fn project_frequency_yandex_regions_add = "projectFrequencyYandexRegionsAdd"(
        project_id: u64 => "project_id",
        region_id: u64 => "region_id"
    );

    fn project_frequency_yandex_regions_delete = "projectFrequencyYandexRegionsDelete"(
        project_id: u64 => "project_id",
        region_id: u64 => "region_id"
    );

    fn project_frequency_tasks = "projectFrequencyTasks"(
        project_id: u64 => "project_id";
        page: u32 => "page",
        page_size: u32 => "pageSize"
    );
}

impl<T: Transport> SpySerpClient<T> {
    /// Position statistics of a project for one domain (`0` for all).
    ///
    /// Vendor method `statistic`. Every filter in `options` is sent, unset
    /// ones as `false`.
    pub fn statistic(&self, project_id: u64, domain: u64, options: &StatisticOptions) -> Result<Value, ApiError> {
        let params = Params::new()
            .required("project_id", project_id)
            .required("domain", domain)
            .extend(options);
        self.invoke("statistic", params)
    }
}
