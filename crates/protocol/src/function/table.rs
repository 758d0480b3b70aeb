use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use super::category::FunctionCategory;
use super::kinds::{ClientFunction, Function, ProtocolFunction};

/// Name and identity of an RPC function.
///
/// Specs are plain `Copy` values drawn from a closed, process-wide table.
/// [`FunctionSpec::decode`] never fails: names outside the table decode to
/// [`FunctionSpec::NONE`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct FunctionSpec {
    name: &'static str,
    function: Function,
}

impl FunctionSpec {
    /// Sentinel returned for names outside the function table.
    pub const NONE: Self = Self::new("none", Function::None);

    const fn new(name: &'static str, function: Function) -> Self {
        Self { name, function }
    }

    /// Classifies a function name received on the wire.
    ///
    /// Matching is exact and case-sensitive.
    #[must_use]
    pub fn decode(name: &str) -> Self {
        index().get(name).copied().unwrap_or(Self::NONE)
    }

    /// Returns the table entry for a protocol function.
    #[must_use]
    pub fn protocol(function: ProtocolFunction) -> Self {
        Self::find(Function::Protocol(function))
    }

    /// Returns the table entry for a client function.
    #[must_use]
    pub fn client(function: ClientFunction) -> Self {
        Self::find(Function::Client(function))
    }

    fn find(function: Function) -> Self {
        FUNCTIONS
            .iter()
            .copied()
            .find(|spec| spec.function == function)
            .unwrap_or(Self::NONE)
    }

    /// Wire name of the function.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Identity of the function.
    #[must_use]
    pub const fn function(self) -> Function {
        self.function
    }

    /// Category used by the dispatcher to route the function.
    #[must_use]
    pub const fn category(self) -> FunctionCategory {
        match self.function {
            Function::Protocol(_) => FunctionCategory::Protocol,
            Function::Client(_) => FunctionCategory::Client,
            Function::User => FunctionCategory::User,
            Function::Server => FunctionCategory::Server,
            Function::None => FunctionCategory::None,
        }
    }

    /// Reports whether the spec is the [`FunctionSpec::NONE`] sentinel.
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self.function, Function::None)
    }

    /// Every known function in table order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &FUNCTIONS
    }
}

impl ProtocolFunction {
    /// Wire name of the function.
    #[must_use]
    pub fn name(self) -> &'static str {
        FunctionSpec::protocol(self).name()
    }
}

impl ClientFunction {
    /// Wire name of the function.
    #[must_use]
    pub fn name(self) -> &'static str {
        FunctionSpec::client(self).name()
    }
}

fn index() -> &'static FxHashMap<&'static str, FunctionSpec> {
    static INDEX: OnceLock<FxHashMap<&'static str, FunctionSpec>> = OnceLock::new();
    INDEX.get_or_init(|| FUNCTIONS.iter().map(|spec| (spec.name, *spec)).collect())
}

static FUNCTIONS: [FunctionSpec; 168] = [
    // protocol
    FunctionSpec::new("protocol", Function::Protocol(ProtocolFunction::Protocol)),
    FunctionSpec::new("flush1", Function::Protocol(ProtocolFunction::Flush1)),
    FunctionSpec::new("flush2", Function::Protocol(ProtocolFunction::Flush2)),
    FunctionSpec::new("release", Function::Protocol(ProtocolFunction::Release)),
    FunctionSpec::new("release2", Function::Protocol(ProtocolFunction::Release2)),
    FunctionSpec::new("crypto", Function::Protocol(ProtocolFunction::Crypto)),
    FunctionSpec::new("compress1", Function::Protocol(ProtocolFunction::Compress1)),
    FunctionSpec::new("compress2", Function::Protocol(ProtocolFunction::Compress2)),
    // user
    FunctionSpec::new("user-specified", Function::User),
    FunctionSpec::new("user-depots", Function::User),
    FunctionSpec::new("user-info", Function::User),
    FunctionSpec::new("user-files", Function::User),
    FunctionSpec::new("user-clients", Function::User),
    FunctionSpec::new("user-jobs", Function::User),
    FunctionSpec::new("user-changes", Function::User),
    FunctionSpec::new("user-login", Function::User),
    FunctionSpec::new("user-logout", Function::User),
    FunctionSpec::new("user-client", Function::User),
    FunctionSpec::new("user-fstat", Function::User),
    FunctionSpec::new("user-sync", Function::User),
    FunctionSpec::new("user-change", Function::User),
    FunctionSpec::new("user-describe", Function::User),
    FunctionSpec::new("user-opened", Function::User),
    FunctionSpec::new("user-edit", Function::User),
    FunctionSpec::new("user-add", Function::User),
    FunctionSpec::new("user-delete", Function::User),
    FunctionSpec::new("user-revert", Function::User),
    FunctionSpec::new("user-submit", Function::User),
    FunctionSpec::new("user-filelog", Function::User),
    FunctionSpec::new("user-print", Function::User),
    FunctionSpec::new("user-where", Function::User),
    FunctionSpec::new("user-have", Function::User),
    FunctionSpec::new("user-reopen", Function::User),
    FunctionSpec::new("user-dirs", Function::User),
    FunctionSpec::new("user-integ", Function::User),
    FunctionSpec::new("user-resolve", Function::User),
    FunctionSpec::new("user-resolved", Function::User),
    FunctionSpec::new("user-fixes", Function::User),
    FunctionSpec::new("user-jobspec", Function::User),
    FunctionSpec::new("user-fix", Function::User),
    FunctionSpec::new("user-job", Function::User),
    FunctionSpec::new("user-lock", Function::User),
    FunctionSpec::new("user-unlock", Function::User),
    FunctionSpec::new("user-diff", Function::User),
    FunctionSpec::new("user-counters", Function::User),
    FunctionSpec::new("user-users", Function::User),
    FunctionSpec::new("user-move", Function::User),
    FunctionSpec::new("user-labels", Function::User),
    FunctionSpec::new("user-label", Function::User),
    FunctionSpec::new("user-labelsync", Function::User),
    FunctionSpec::new("user-tag", Function::User),
    FunctionSpec::new("user-monitor", Function::User),
    FunctionSpec::new("user-group", Function::User),
    FunctionSpec::new("user-groups", Function::User),
    FunctionSpec::new("user-branch", Function::User),
    FunctionSpec::new("user-branches", Function::User),
    FunctionSpec::new("user-counter", Function::User),
    FunctionSpec::new("user-integrated", Function::User),
    FunctionSpec::new("user-annotate", Function::User),
    FunctionSpec::new("user-dbschema", Function::User),
    FunctionSpec::new("user-export", Function::User),
    FunctionSpec::new("user-shelve", Function::User),
    FunctionSpec::new("user-unshelve", Function::User),
    FunctionSpec::new("user-protects", Function::User),
    FunctionSpec::new("user-protect", Function::User),
    FunctionSpec::new("user-user", Function::User),
    FunctionSpec::new("user-reviews", Function::User),
    FunctionSpec::new("user-review", Function::User),
    FunctionSpec::new("user-diff2", Function::User),
    FunctionSpec::new("user-interchanges", Function::User),
    FunctionSpec::new("user-grep", Function::User),
    FunctionSpec::new("user-depot", Function::User),
    FunctionSpec::new("user-attribute", Function::User),
    FunctionSpec::new("user-spec", Function::User),
    FunctionSpec::new("user-copy", Function::User),
    FunctionSpec::new("user-configure", Function::User),
    FunctionSpec::new("user-passwd", Function::User),
    FunctionSpec::new("user-diskspace", Function::User),
    FunctionSpec::new("user-obliterate", Function::User),
    FunctionSpec::new("user-streams", Function::User),
    FunctionSpec::new("user-stream", Function::User),
    FunctionSpec::new("user-istat", Function::User),
    FunctionSpec::new("user-merge", Function::User),
    FunctionSpec::new("user-logtail", Function::User),
    FunctionSpec::new("user-trust", Function::User),
    FunctionSpec::new("user-reconcile", Function::User),
    FunctionSpec::new("user-duplicate", Function::User),
    FunctionSpec::new("user-unload", Function::User),
    FunctionSpec::new("user-reload", Function::User),
    FunctionSpec::new("user-populate", Function::User),
    FunctionSpec::new("user-key", Function::User),
    FunctionSpec::new("user-keys", Function::User),
    FunctionSpec::new("user-search", Function::User),
    FunctionSpec::new("user-property", Function::User),
    FunctionSpec::new("user-sizes", Function::User),
    FunctionSpec::new("user-journalwait", Function::User),
    FunctionSpec::new("user-triggers", Function::User),
    FunctionSpec::new("user-verify", Function::User),
    FunctionSpec::new("user-renameuser", Function::User),
    FunctionSpec::new("user-graph", Function::User),
    FunctionSpec::new("user-repos", Function::User),
    FunctionSpec::new("user-transmit", Function::User),
    FunctionSpec::new("user-list", Function::User),
    FunctionSpec::new("user-retype", Function::User),
    // client
    FunctionSpec::new("client-Message", Function::Client(ClientFunction::Message)),
    FunctionSpec::new("client-FstatInfo", Function::Client(ClientFunction::FstatInfo)),
    FunctionSpec::new("client-Prompt", Function::Client(ClientFunction::Prompt)),
    FunctionSpec::new("client-SetPassword", Function::Client(ClientFunction::SetPassword)),
    FunctionSpec::new("client-Crypto", Function::Client(ClientFunction::Crypto)),
    FunctionSpec::new("client-Ack", Function::Client(ClientFunction::Ack)),
    FunctionSpec::new("client-ChmodFile", Function::Client(ClientFunction::ChmodFile)),
    FunctionSpec::new("client-OpenFile", Function::Client(ClientFunction::OpenFile)),
    FunctionSpec::new("client-WriteFile", Function::Client(ClientFunction::WriteFile)),
    FunctionSpec::new("client-CloseFile", Function::Client(ClientFunction::CloseFile)),
    FunctionSpec::new("client-CheckFile", Function::Client(ClientFunction::CheckFile)),
    FunctionSpec::new("client-InputData", Function::Client(ClientFunction::InputData)),
    FunctionSpec::new("client-SendFile", Function::Client(ClientFunction::SendFile)),
    FunctionSpec::new("client-DeleteFile", Function::Client(ClientFunction::DeleteFile)),
    FunctionSpec::new("client-OutputBinary", Function::Client(ClientFunction::OutputBinary)),
    FunctionSpec::new("client-OutputError", Function::Client(ClientFunction::OutputError)),
    FunctionSpec::new("client-OutputText", Function::Client(ClientFunction::OutputText)),
    FunctionSpec::new("client-OutputData", Function::Client(ClientFunction::OutputData)),
    FunctionSpec::new("client-OutputInfo", Function::Client(ClientFunction::OutputInfo)),
    FunctionSpec::new("client-MoveFile", Function::Client(ClientFunction::MoveFile)),
    FunctionSpec::new("client-OpenMerge3", Function::Client(ClientFunction::OpenMerge3)),
    FunctionSpec::new("client-WriteMerge", Function::Client(ClientFunction::WriteMerge)),
    FunctionSpec::new("client-CloseMerge", Function::Client(ClientFunction::CloseMerge)),
    FunctionSpec::new("client-SSO", Function::Client(ClientFunction::SingleSignOn)),
    FunctionSpec::new("client-OpenMerge2", Function::Client(ClientFunction::OpenMerge2)),
    FunctionSpec::new("client-ReconcileEdit", Function::Client(ClientFunction::ReconcileEdit)),
    FunctionSpec::new("client-ReconcileAdd", Function::Client(ClientFunction::ReconcileAdd)),
    FunctionSpec::new("client-ReconcileFlush", Function::Client(ClientFunction::ReconcileFlush)),
    FunctionSpec::new("client-Progress", Function::Client(ClientFunction::Progress)),
    FunctionSpec::new("client-ReceiveFiles", Function::Client(ClientFunction::ReceiveFiles)),
    FunctionSpec::new("client-FstatPartial", Function::Client(ClientFunction::FstatPartial)),
    FunctionSpec::new("client-OpenDiff", Function::Client(ClientFunction::OpenDiff)),
    FunctionSpec::new("client-WriteDiff", Function::Client(ClientFunction::WriteDiff)),
    FunctionSpec::new("client-CloseDiff", Function::Client(ClientFunction::CloseDiff)),
    FunctionSpec::new("client-OpenMatch", Function::Client(ClientFunction::OpenMatch)),
    FunctionSpec::new("client-WriteMatch", Function::Client(ClientFunction::WriteMatch)),
    FunctionSpec::new("client-CloseMatch", Function::Client(ClientFunction::CloseMatch)),
    FunctionSpec::new("client-AckMatch", Function::Client(ClientFunction::AckMatch)),
    FunctionSpec::new("client-ExactMatch", Function::Client(ClientFunction::ExactMatch)),
    FunctionSpec::new("client-ConvertFile", Function::Client(ClientFunction::ConvertFile)),
    FunctionSpec::new("client-ActionResolve", Function::Client(ClientFunction::ActionResolve)),
    FunctionSpec::new("client-EditData", Function::Client(ClientFunction::EditData)),
    FunctionSpec::new("client-ErrorPause", Function::Client(ClientFunction::ErrorPause)),
    FunctionSpec::new("client-HandleError", Function::Client(ClientFunction::HandleError)),
    FunctionSpec::new("client-Ping", Function::Client(ClientFunction::Ping)),
    FunctionSpec::new("client-OpenUrl", Function::Client(ClientFunction::OpenUrl)),
    FunctionSpec::new("client-ScanDir", Function::Client(ClientFunction::ScanDir)),
    FunctionSpec::new("dm-Prompt", Function::Client(ClientFunction::DmPrompt)),
    FunctionSpec::new("dm-OpenFile", Function::Client(ClientFunction::DmOpenFile)),
    FunctionSpec::new("dm-MoveFile", Function::Client(ClientFunction::DmMoveFile)),
    // server
    FunctionSpec::new("dm-Login", Function::Server),
    FunctionSpec::new("dm-Passwd", Function::Server),
    FunctionSpec::new("dm-SubmitChange", Function::Server),
    FunctionSpec::new("lbr-Open", Function::Server),
    FunctionSpec::new("dm-LbrOpen", Function::Server),
    FunctionSpec::new("lbr-WriteFile", Function::Server),
    FunctionSpec::new("dm-SubmitFile", Function::Server),
    FunctionSpec::new("dm-CommitSubmit", Function::Server),
    FunctionSpec::new("server-ReleaseFile", Function::Server),
    FunctionSpec::new("server-CmpFile", Function::Server),
    FunctionSpec::new("dm-ResolvedFile", Function::Server),
    FunctionSpec::new("dm-ResolvedFailed", Function::Server),
    FunctionSpec::new("server-ReconcileFile", Function::Server),
    FunctionSpec::new("server-ReconcileAdds", Function::Server),
];
