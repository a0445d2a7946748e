use crate::application::dto::{FetchSbomRequest, FetchSbomResponse};
use crate::ports::outbound::{DepGraphReader, GetSbomForDepGraphRequest, ProgressReporter, SbomClient};
use crate::sbom_retrieval::domain::DepGraphLocator;
use crate::shared::error::SbomError;
use crate::shared::{CallContext, Result};

/// FetchSbomUseCase - Core use case for SBOM retrieval
///
/// This use case orchestrates the retrieval workflow using generic
/// dependency injection for all infrastructure dependencies.
///
/// # Type Parameters
/// * `C` - SbomClient implementation
/// * `R` - DepGraphReader implementation
/// * `P` - ProgressReporter implementation
pub struct FetchSbomUseCase<C, R, P> {
    sbom_client: C,
    dep_graph_reader: R,
    progress_reporter: P,
}

impl<C, R, P> FetchSbomUseCase<C, R, P>
where
    C: SbomClient,
    R: DepGraphReader,
    P: ProgressReporter,
{
    /// Creates a new FetchSbomUseCase with injected dependencies
    pub fn new(sbom_client: C, dep_graph_reader: R, progress_reporter: P) -> Self {
        Self {
            sbom_client,
            dep_graph_reader,
            progress_reporter,
        }
    }

    /// Executes the SBOM retrieval use case
    ///
    /// # Arguments
    /// * `ctx` - Call context bounding the whole retrieval
    /// * `request` - Identifiers, format and optional dependency graph path
    ///
    /// # Returns
    /// FetchSbomResponse carrying a non-empty SBOM document
    pub async fn execute(
        &self,
        ctx: &CallContext,
        request: FetchSbomRequest,
    ) -> Result<FetchSbomResponse> {
        // Step 1: Validate identifiers before touching the file system or network
        let locator = DepGraphLocator::new(&request.org_id, &request.project_id)?;

        // Step 2: Load the dependency graph if one was given
        let mut sbom_request = GetSbomForDepGraphRequest::new(request.format);
        if let Some(path) = &request.dep_graph_path {
            self.progress_reporter.report(&format!(
                "📖 Loading dependency graph from: {}",
                path.display()
            ));
            sbom_request = sbom_request.with_dep_graph(self.dep_graph_reader.read_dep_graph(path)?);
        }
        if let Some(subject) = request.subject {
            sbom_request = sbom_request.with_subject(subject);
        }

        // Step 3: Ask the service
        self.progress_reporter.begin_wait(&format!(
            "Requesting {} SBOM for {}",
            request.format, locator
        ));
        let outcome = self
            .sbom_client
            .get_sbom_for_dep_graph(ctx, locator.org_id(), locator.project_id(), &sbom_request)
            .await;
        self.progress_reporter.end_wait();

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                self.progress_reporter
                    .report_error(&format!("❌ SBOM request for {} failed", locator));
                return Err(e);
            }
        };

        // Step 4: A successful call must carry a document
        if result.is_empty() {
            return Err(SbomError::EmptyDocument {
                org_id: locator.org_id().to_string(),
                project_id: locator.project_id().to_string(),
            }
            .into());
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Retrieved {} SBOM for {} ({} bytes, {})",
            request.format,
            locator,
            result.size(),
            result.media_type
        ));

        Ok(FetchSbomResponse::new(locator, result))
    }
}
