//! RMCP `ServerHandler` implementation for [`ArticleService`].
//!
//! Describe requests return the capability-scoped catalog; invoke requests
//! go through the shared dispatcher, which folds tool-level failures into
//! the `isError` envelope rather than protocol errors.

use rmcp::model::{
    CallToolRequestParam, CallToolResult, InitializeResult, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities,
};
use rmcp::ServerHandler;

use crate::app::ArticleService;
use crate::catalog;
use crate::dispatch::dispatch;

impl ServerHandler for ArticleService {
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, rmcp::ErrorData>> + Send + '_
    {
        std::future::ready(Ok(ListToolsResult {
            tools: catalog::tools(self.capabilities()),
            next_cursor: None,
        }))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, rmcp::ErrorData>> + Send + '_
    {
        Box::pin(async move {
            let result = dispatch(
                self.store().as_ref(),
                self.capabilities(),
                request.name.as_ref(),
                request.arguments.as_ref(),
            )
            .await;
            Ok(result)
        })
    }

    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            instructions: Some("Content gateway for the boardpress website".into()),
            ..Default::default()
        }
    }
}
