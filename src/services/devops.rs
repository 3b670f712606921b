use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::database::CredentialSource;
use crate::error::{Error, Result};
use crate::models::{
    classify_state, level_for_type, DevOpsSettings, Iteration, IterationsList, SchedulingFields,
    StateCategory, WorkItem, WorkItemCurrentState, WorkItemRevision,
};
use crate::utils::config;

/// Platform limit on ids per detail/batch request.
pub const MAX_BATCH_IDS: usize = 200;

const API_VERSION: &str = "7.1";
const ITERATIONS_API_VERSION: &str = "7.2-preview.1";

const TYPE_WHITELIST: &str =
    "('Epic', 'Feature', 'User Story', 'Product Backlog Item', 'Task', 'Bug')";

const DETAIL_FIELDS: [&str; 9] = [
    "System.Id",
    "System.Title",
    "System.WorkItemType",
    "System.State",
    "System.AssignedTo",
    "System.Parent",
    "Microsoft.VSTS.Scheduling.OriginalEstimate",
    "Microsoft.VSTS.Scheduling.CompletedWork",
    "Microsoft.VSTS.Scheduling.RemainingWork",
];

// Well-known platform icon ids per work-item type.
const TYPE_ICONS: [(&str, &str); 6] = [
    ("Epic", "icon_crown"),
    ("Feature", "icon_trophy"),
    ("User Story", "icon_book"),
    ("Product Backlog Item", "icon_list"),
    ("Task", "icon_clipboard"),
    ("Bug", "icon_insect"),
];

/// Everything the aggregation engine asks of the work-tracking platform.
#[async_trait]
pub trait DevOpsApi: Send + Sync {
    /// Recursive hierarchy-link query; returns the distinct union of source
    /// and target ids over the returned link edges.
    async fn query_hierarchy_ids(
        &self,
        organization: &str,
        project: &str,
        assignee: Option<&str>,
    ) -> Result<Vec<i64>>;

    /// Flat fallback query over the same type whitelist, excluding items
    /// already in terminal states.
    async fn query_flat_ids(
        &self,
        organization: &str,
        project: &str,
        assignee: Option<&str>,
    ) -> Result<Vec<i64>>;

    /// Details for one chunk of at most [`MAX_BATCH_IDS`] ids. Icons are not
    /// resolved here; the batch resolver attaches them afterwards.
    async fn get_work_item_details(
        &self,
        organization: &str,
        project: &str,
        ids: &[i64],
    ) -> Result<Vec<WorkItem>>;

    /// Raw state name of a single work item.
    async fn get_work_item_state(
        &self,
        organization: &str,
        project: &str,
        work_item_id: i64,
    ) -> Result<String>;

    async fn get_scheduling_fields(
        &self,
        organization: &str,
        project: &str,
        work_item_id: i64,
    ) -> Result<SchedulingFields>;

    /// Writes CompletedWork and RemainingWork back to the platform.
    async fn update_work_item_hours(
        &self,
        organization: &str,
        project: &str,
        work_item_id: i64,
        completed_hours: f64,
        remaining_hours: f64,
    ) -> Result<()>;

    async fn get_work_item_revisions(
        &self,
        organization: &str,
        project: &str,
        work_item_id: i64,
    ) -> Result<Vec<WorkItemRevision>>;

    /// Current state of one chunk of ids via the batch endpoint. Scoped to
    /// the organization; project narrows the lookup when given.
    async fn get_current_states(
        &self,
        organization: &str,
        project: Option<&str>,
        ids: &[i64],
    ) -> Result<Vec<WorkItemCurrentState>>;

    /// State-name to category map of a process work-item type.
    async fn get_process_states(
        &self,
        organization: &str,
        process_id: &str,
        wit_ref_name: &str,
    ) -> Result<HashMap<String, StateCategory>>;

    /// Displayable icon reference for a work-item type.
    async fn get_type_icon(&self, organization: &str, work_item_type: &str) -> Result<String>;

    async fn list_iterations(
        &self,
        organization: &str,
        project: &str,
        team: Option<&str>,
    ) -> Result<IterationsList>;

    /// Work-item ids assigned to one iteration, sorted ascending.
    async fn get_iteration_work_item_ids(
        &self,
        organization: &str,
        project: &str,
        iteration_id: &str,
        team: Option<&str>,
    ) -> Result<Vec<i64>>;
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ValueList<T> {
    #[serde(default)]
    value: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct WiqlLinksResponse {
    #[serde(default, rename = "workItemRelations")]
    work_item_relations: Vec<WiqlRelation>,
}

#[derive(Debug, Deserialize)]
struct WiqlRelation {
    #[serde(default)]
    source: Option<WiqlRef>,
    #[serde(default)]
    target: Option<WiqlRef>,
}

#[derive(Debug, Deserialize)]
struct WiqlRef {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct WiqlFlatResponse {
    #[serde(default, rename = "workItems")]
    work_items: Vec<WiqlRef>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawWorkItem {
    pub id: i64,
    #[serde(default)]
    pub fields: RawFields,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawFields {
    #[serde(rename = "System.Title")]
    pub title: Option<String>,
    #[serde(rename = "System.WorkItemType")]
    pub work_item_type: Option<String>,
    #[serde(rename = "System.State")]
    pub state: Option<String>,
    #[serde(rename = "System.AssignedTo")]
    pub assigned_to: Option<AssignedToField>,
    #[serde(rename = "System.Parent")]
    pub parent: Option<i64>,
    #[serde(rename = "System.ChangedDate")]
    pub changed_date: Option<String>,
    #[serde(rename = "Microsoft.VSTS.Scheduling.OriginalEstimate")]
    pub original_estimate: Option<f64>,
    #[serde(rename = "Microsoft.VSTS.Scheduling.CompletedWork")]
    pub completed_work: Option<f64>,
    #[serde(rename = "Microsoft.VSTS.Scheduling.RemainingWork")]
    pub remaining_work: Option<f64>,
}

/// The platform serializes assignees either as an identity object or as a
/// bare display string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum AssignedToField {
    Identity {
        #[serde(rename = "displayName")]
        display_name: String,
    },
    Plain(String),
    Other(serde_json::Value),
}

impl AssignedToField {
    fn into_display_name(self) -> String {
        match self {
            Self::Identity { display_name } => display_name,
            Self::Plain(name) => name,
            Self::Other(_) => String::new(),
        }
    }
}

impl From<RawWorkItem> for WorkItem {
    fn from(raw: RawWorkItem) -> Self {
        let fields = raw.fields;
        let state = fields.state.unwrap_or_default();
        let state_category = classify_state(&state);
        let item_type = fields.work_item_type.unwrap_or_default();
        let level = level_for_type(&item_type);
        let assigned_to = fields
            .assigned_to
            .map(AssignedToField::into_display_name)
            .filter(|name| !name.is_empty());

        WorkItem {
            id: raw.id,
            title: fields.title.unwrap_or_default(),
            item_type,
            state,
            state_category,
            assigned_to,
            parent_id: fields.parent,
            original_estimate: fields.original_estimate,
            completed_work: fields.completed_work,
            remaining_work: fields.remaining_work,
            icon_url: String::new(),
            level,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawRevision {
    rev: i64,
    #[serde(default)]
    fields: RawFields,
}

#[derive(Debug, Default, Deserialize)]
struct RawProcessState {
    name: String,
    #[serde(rename = "stateCategory")]
    state_category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawIteration {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    attributes: RawIterationAttributes,
}

#[derive(Debug, Default, Deserialize)]
struct RawIterationAttributes {
    #[serde(rename = "startDate")]
    start_date: Option<String>,
    #[serde(rename = "finishDate")]
    finish_date: Option<String>,
    #[serde(rename = "timeFrame")]
    time_frame: Option<String>,
}

// ─── Query construction and decoding ─────────────────────────────────────────

fn hierarchy_wiql(project: &str, assignee: Option<&str>) -> String {
    let assigned_filter = assignee
        .map(|email| format!("AND [Source].[System.AssignedTo] = '{}' ", email))
        .unwrap_or_default();

    format!(
        "SELECT [System.Id] \
         FROM WorkItemLinks \
         WHERE ( \
             [Source].[System.TeamProject] = '{}' \
             AND [Source].[System.WorkItemType] IN {} \
             {}\
         ) \
         AND ([System.Links.LinkType] = 'System.LinkTypes.Hierarchy-Forward') \
         AND ( \
             [Target].[System.WorkItemType] IN {} \
         ) \
         MODE (Recursive)",
        project, TYPE_WHITELIST, assigned_filter, TYPE_WHITELIST
    )
}

fn flat_wiql(project: &str, assignee: Option<&str>) -> String {
    let assigned_filter = assignee
        .map(|email| format!("AND [System.AssignedTo] = '{}' ", email))
        .unwrap_or_default();

    format!(
        "SELECT [System.Id] \
         FROM WorkItems \
         WHERE [System.TeamProject] = '{}' \
         AND [System.WorkItemType] IN {} \
         AND [System.State] NOT IN ('Removed', 'Closed') \
         {}\
         ORDER BY [System.WorkItemType], [System.Id]",
        project, TYPE_WHITELIST, assigned_filter
    )
}

fn ids_from_link_relations(relations: &[WiqlRelation]) -> Vec<i64> {
    let mut ids = BTreeSet::new();
    for relation in relations {
        if let Some(source) = &relation.source {
            ids.insert(source.id);
        }
        if let Some(target) = &relation.target {
            ids.insert(target.id);
        }
    }
    ids.into_iter().collect()
}

fn iterations_from(raw: Vec<RawIteration>) -> IterationsList {
    let mut iterations = Vec::with_capacity(raw.len());
    let mut current_iteration_id = None;

    for item in raw {
        if item.attributes.time_frame.as_deref() == Some("current") {
            current_iteration_id = Some(item.id.clone());
        }
        iterations.push(Iteration {
            id: item.id,
            name: item.name,
            path: item.path,
            url: item.url,
            start_date: item.attributes.start_date,
            finish_date: item.attributes.finish_date,
            time_frame: item.attributes.time_frame,
        });
    }

    IterationsList { count: iterations.len(), iterations, current_iteration_id }
}

fn auth_header_value(token: &str) -> String {
    // JWTs carry two dots; anything else is treated as a PAT
    if token.matches('.').count() == 2 {
        format!("Bearer {}", token)
    } else {
        format!("Basic {}", BASE64.encode(format!(":{}", token)))
    }
}

fn icon_id_for_type(work_item_type: &str) -> &'static str {
    TYPE_ICONS
        .iter()
        .find(|(name, _)| *name == work_item_type)
        .map(|(_, icon)| *icon)
        .unwrap_or("icon_clipboard")
}

async fn require_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail: String = response
        .text()
        .await
        .unwrap_or_default()
        .chars()
        .take(500)
        .collect();
    Err(Error::Upstream { status: status.as_u16(), detail })
}

// ─── HTTP client ─────────────────────────────────────────────────────────────

/// reqwest-backed [`DevOpsApi`] with a per-organization credential chain:
/// stored credential, per-organization environment token, then the global
/// configured PAT. Resolved tokens are cached for the client's lifetime.
pub struct DevOpsClient {
    http: reqwest::Client,
    settings: DevOpsSettings,
    credentials: Option<Arc<dyn CredentialSource>>,
    token_cache: Mutex<HashMap<String, String>>,
}

impl DevOpsClient {
    pub fn new(settings: DevOpsSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Ok(Self { http, settings, credentials: None, token_cache: Mutex::new(HashMap::new()) })
    }

    pub fn with_credentials(mut self, source: Arc<dyn CredentialSource>) -> Self {
        self.credentials = Some(source);
        self
    }

    fn single_item_timeout(&self) -> Duration {
        Duration::from_secs(self.settings.single_item_timeout_secs)
    }

    fn org_url(&self, organization: &str, path: &str) -> String {
        format!("{}/{}/_apis/{}", self.settings.base_url, organization, path)
    }

    fn project_url(&self, organization: &str, project: &str, path: &str) -> String {
        format!("{}/{}/{}/_apis/{}", self.settings.base_url, organization, project, path)
    }

    async fn token_for_org(&self, organization: &str) -> Option<String> {
        {
            let cache = self.token_cache.lock().await;
            if let Some(token) = cache.get(organization) {
                return Some(token.clone());
            }
        }

        let mut resolved = None;
        if let Some(source) = &self.credentials {
            match source.token_for_org(organization).await {
                Ok(found) => resolved = found,
                Err(e) => log::warn!("credential lookup for {} failed: {}", organization, e),
            }
        }
        if resolved.is_none() {
            resolved = config::org_pat_from_env(organization);
        }
        if resolved.is_none() {
            let global = self.settings.pat.trim();
            if !global.is_empty() {
                resolved = Some(global.to_string());
            }
        }

        if let Some(token) = &resolved {
            let mut cache = self.token_cache.lock().await;
            cache.insert(organization.to_string(), token.clone());
        }
        resolved
    }

    async fn auth_header(&self, organization: &str) -> Result<String> {
        match self.token_for_org(organization).await {
            Some(token) => Ok(auth_header_value(&token)),
            None => Err(Error::MissingCredential(organization.to_string())),
        }
    }

    async fn run_wiql(
        &self,
        organization: &str,
        project: &str,
        query: String,
    ) -> Result<reqwest::Response> {
        let auth = self.auth_header(organization).await?;
        let url = self.project_url(
            organization,
            project,
            &format!("wit/wiql?api-version={}", API_VERSION),
        );
        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, auth)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;
        require_success(response).await
    }

    /// GET on a single work item, mapping 404 to a typed not-found error.
    async fn get_single_item(
        &self,
        organization: &str,
        project: &str,
        work_item_id: i64,
        query: &str,
    ) -> Result<RawFields> {
        let auth = self.auth_header(organization).await?;
        let url = self.project_url(
            organization,
            project,
            &format!("wit/workitems/{}?{}&api-version={}", work_item_id, query, API_VERSION),
        );
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, auth)
            .timeout(self.single_item_timeout())
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::WorkItemNotFound(work_item_id));
        }
        let response = require_success(response).await?;
        let data: RawWorkItem = response.json().await?;
        Ok(data.fields)
    }
}

#[async_trait]
impl DevOpsApi for DevOpsClient {
    async fn query_hierarchy_ids(
        &self,
        organization: &str,
        project: &str,
        assignee: Option<&str>,
    ) -> Result<Vec<i64>> {
        let response = self
            .run_wiql(organization, project, hierarchy_wiql(project, assignee))
            .await?;
        let data: WiqlLinksResponse = response.json().await?;
        Ok(ids_from_link_relations(&data.work_item_relations))
    }

    async fn query_flat_ids(
        &self,
        organization: &str,
        project: &str,
        assignee: Option<&str>,
    ) -> Result<Vec<i64>> {
        let response = self
            .run_wiql(organization, project, flat_wiql(project, assignee))
            .await?;
        let data: WiqlFlatResponse = response.json().await?;
        Ok(data.work_items.into_iter().map(|item| item.id).collect())
    }

    async fn get_work_item_details(
        &self,
        organization: &str,
        project: &str,
        ids: &[i64],
    ) -> Result<Vec<WorkItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let auth = self.auth_header(organization).await?;
        let id_list = ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
        let url = self.project_url(
            organization,
            project,
            &format!(
                "wit/workitems?ids={}&fields={}&api-version={}",
                id_list,
                DETAIL_FIELDS.join(","),
                API_VERSION
            ),
        );
        let response = self.http.get(&url).header(AUTHORIZATION, auth).send().await?;
        let response = require_success(response).await?;
        let data: ValueList<RawWorkItem> = response.json().await?;
        Ok(data.value.into_iter().map(WorkItem::from).collect())
    }

    async fn get_work_item_state(
        &self,
        organization: &str,
        project: &str,
        work_item_id: i64,
    ) -> Result<String> {
        let fields = self
            .get_single_item(organization, project, work_item_id, "fields=System.State")
            .await?;
        Ok(fields.state.unwrap_or_default())
    }

    async fn get_scheduling_fields(
        &self,
        organization: &str,
        project: &str,
        work_item_id: i64,
    ) -> Result<SchedulingFields> {
        let fields = self
            .get_single_item(
                organization,
                project,
                work_item_id,
                "fields=Microsoft.VSTS.Scheduling.OriginalEstimate,\
                 Microsoft.VSTS.Scheduling.RemainingWork,\
                 Microsoft.VSTS.Scheduling.CompletedWork",
            )
            .await?;
        Ok(SchedulingFields {
            original_estimate: fields.original_estimate,
            completed_work: fields.completed_work,
            remaining_work: fields.remaining_work,
        })
    }

    async fn update_work_item_hours(
        &self,
        organization: &str,
        project: &str,
        work_item_id: i64,
        completed_hours: f64,
        remaining_hours: f64,
    ) -> Result<()> {
        let auth = self.auth_header(organization).await?;
        let url = self.project_url(
            organization,
            project,
            &format!("wit/workitems/{}?api-version={}", work_item_id, API_VERSION),
        );
        let patch = serde_json::json!([
            {
                "op": "add",
                "path": "/fields/Microsoft.VSTS.Scheduling.CompletedWork",
                "value": completed_hours,
            },
            {
                "op": "add",
                "path": "/fields/Microsoft.VSTS.Scheduling.RemainingWork",
                "value": remaining_hours,
            },
        ]);
        let response = self
            .http
            .patch(&url)
            .header(AUTHORIZATION, auth)
            .header(CONTENT_TYPE, "application/json-patch+json")
            .timeout(self.single_item_timeout())
            .json(&patch)
            .send()
            .await?;
        require_success(response).await?;
        Ok(())
    }

    async fn get_work_item_revisions(
        &self,
        organization: &str,
        project: &str,
        work_item_id: i64,
    ) -> Result<Vec<WorkItemRevision>> {
        let auth = self.auth_header(organization).await?;
        let url = self.project_url(
            organization,
            project,
            &format!("wit/workitems/{}/revisions?api-version={}", work_item_id, API_VERSION),
        );
        let response = self.http.get(&url).header(AUTHORIZATION, auth).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::WorkItemNotFound(work_item_id));
        }
        let response = require_success(response).await?;
        let data: ValueList<RawRevision> = response.json().await?;

        Ok(data
            .value
            .into_iter()
            .map(|revision| WorkItemRevision {
                rev: revision.rev,
                changed_date: revision.fields.changed_date.unwrap_or_default(),
                state: revision.fields.state,
                assigned_to: revision
                    .fields
                    .assigned_to
                    .map(AssignedToField::into_display_name)
                    .filter(|name| !name.is_empty()),
            })
            .collect())
    }

    async fn get_current_states(
        &self,
        organization: &str,
        project: Option<&str>,
        ids: &[i64],
    ) -> Result<Vec<WorkItemCurrentState>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let auth = self.auth_header(organization).await?;
        let path = format!("wit/workitemsbatch?api-version={}", API_VERSION);
        let url = match project {
            Some(project) => self.project_url(organization, project, &path),
            None => self.org_url(organization, &path),
        };
        let body = serde_json::json!({
            "ids": ids,
            "fields": ["System.Id", "System.State", "System.WorkItemType", "System.AssignedTo"],
            "errorPolicy": "omit",
        });
        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, auth)
            .json(&body)
            .send()
            .await?;
        let response = require_success(response).await?;
        let data: ValueList<RawWorkItem> = response.json().await?;

        Ok(data
            .value
            .into_iter()
            .map(|raw| WorkItemCurrentState {
                id: raw.id,
                state: raw.fields.state,
                item_type: raw.fields.work_item_type,
                assigned_to: raw
                    .fields
                    .assigned_to
                    .map(AssignedToField::into_display_name)
                    .filter(|name| !name.is_empty()),
            })
            .collect())
    }

    async fn get_process_states(
        &self,
        organization: &str,
        process_id: &str,
        wit_ref_name: &str,
    ) -> Result<HashMap<String, StateCategory>> {
        let auth = self.auth_header(organization).await?;
        let url = self.org_url(
            organization,
            &format!(
                "work/processes/{}/workItemTypes/{}/states?api-version={}",
                process_id, wit_ref_name, API_VERSION
            ),
        );
        let response = self.http.get(&url).header(AUTHORIZATION, auth).send().await?;
        let response = require_success(response).await?;
        let data: ValueList<RawProcessState> = response.json().await?;

        Ok(data
            .value
            .into_iter()
            .map(|state| {
                let category = StateCategory::from_name(state.state_category.as_deref().unwrap_or(""));
                (state.name, category)
            })
            .collect())
    }

    async fn get_type_icon(&self, organization: &str, work_item_type: &str) -> Result<String> {
        let url = self.org_url(
            organization,
            &format!(
                "wit/workitemicons/{}?api-version={}",
                icon_id_for_type(work_item_type),
                API_VERSION
            ),
        );
        let mut request = self
            .http
            .get(&url)
            .header(ACCEPT, "image/svg+xml")
            .timeout(self.single_item_timeout());
        // the icon endpoint is public, but an available token is still sent
        if let Some(token) = self.token_for_org(organization).await {
            request = request.header(AUTHORIZATION, auth_header_value(&token));
        }
        let response = require_success(request.send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(format!("data:image/svg+xml;base64,{}", BASE64.encode(&bytes)))
    }

    async fn list_iterations(
        &self,
        organization: &str,
        project: &str,
        team: Option<&str>,
    ) -> Result<IterationsList> {
        let auth = self.auth_header(organization).await?;
        let path = format!("work/teamsettings/iterations?api-version={}", ITERATIONS_API_VERSION);
        let url = match team {
            Some(team) => format!(
                "{}/{}/{}/{}/_apis/{}",
                self.settings.base_url, organization, project, team, path
            ),
            None => self.project_url(organization, project, &path),
        };
        let response = self.http.get(&url).header(AUTHORIZATION, auth).send().await?;
        let response = require_success(response).await?;
        let data: ValueList<RawIteration> = response.json().await?;
        Ok(iterations_from(data.value))
    }

    async fn get_iteration_work_item_ids(
        &self,
        organization: &str,
        project: &str,
        iteration_id: &str,
        team: Option<&str>,
    ) -> Result<Vec<i64>> {
        let auth = self.auth_header(organization).await?;
        let path = format!(
            "work/teamsettings/iterations/{}/workitems?api-version={}",
            iteration_id, ITERATIONS_API_VERSION
        );
        let url = match team {
            Some(team) => format!(
                "{}/{}/{}/{}/_apis/{}",
                self.settings.base_url, organization, project, team, path
            ),
            None => self.project_url(organization, project, &path),
        };
        let response = self.http.get(&url).header(AUTHORIZATION, auth).send().await?;
        let response = require_success(response).await?;
        let data: WiqlLinksResponse = response.json().await?;
        Ok(ids_from_link_relations(&data.work_item_relations))
    }
}
