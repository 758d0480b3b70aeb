/// Connection housekeeping functions.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ProtocolFunction {
    /// `protocol`: server protocol parameter announcement.
    Protocol,
    /// `flush1`: flow-control marker that must be echoed as `flush2`.
    Flush1,
    /// `flush2`: flow-control acknowledgement.
    Flush2,
    /// `release`: end of the current command.
    Release,
    /// `release2`: end of the current command (second form).
    Release2,
    /// `crypto`: connection-level crypto notification.
    Crypto,
    /// `compress1`: transport compression request.
    Compress1,
    /// `compress2`: transport compression acknowledgement.
    Compress2,
}

/// Server-to-client callback functions.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ClientFunction {
    /// `client-Message`
    Message,
    /// `client-FstatInfo`
    FstatInfo,
    /// `client-Prompt`
    Prompt,
    /// `client-SetPassword`
    SetPassword,
    /// `client-Crypto`
    Crypto,
    /// `client-Ack`
    Ack,
    /// `client-ChmodFile`
    ChmodFile,
    /// `client-OpenFile`
    OpenFile,
    /// `client-WriteFile`
    WriteFile,
    /// `client-CloseFile`
    CloseFile,
    /// `client-CheckFile`
    CheckFile,
    /// `client-InputData`
    InputData,
    /// `client-SendFile`
    SendFile,
    /// `client-DeleteFile`
    DeleteFile,
    /// `client-OutputBinary`
    OutputBinary,
    /// `client-OutputError`
    OutputError,
    /// `client-OutputText`
    OutputText,
    /// `client-OutputData`
    OutputData,
    /// `client-OutputInfo`
    OutputInfo,
    /// `client-MoveFile`
    MoveFile,
    /// `client-OpenMerge3`
    OpenMerge3,
    /// `client-WriteMerge`
    WriteMerge,
    /// `client-CloseMerge`
    CloseMerge,
    /// `client-SSO`
    SingleSignOn,
    /// `client-OpenMerge2`
    OpenMerge2,
    /// `client-ReconcileEdit`
    ReconcileEdit,
    /// `client-ReconcileAdd`
    ReconcileAdd,
    /// `client-ReconcileFlush`
    ReconcileFlush,
    /// `client-Progress`
    Progress,
    /// `client-ReceiveFiles`
    ReceiveFiles,
    /// `client-FstatPartial`
    FstatPartial,
    /// `client-OpenDiff`
    OpenDiff,
    /// `client-WriteDiff`
    WriteDiff,
    /// `client-CloseDiff`
    CloseDiff,
    /// `client-OpenMatch`
    OpenMatch,
    /// `client-WriteMatch`
    WriteMatch,
    /// `client-CloseMatch`
    CloseMatch,
    /// `client-AckMatch`
    AckMatch,
    /// `client-ExactMatch`
    ExactMatch,
    /// `client-ConvertFile`
    ConvertFile,
    /// `client-ActionResolve`
    ActionResolve,
    /// `client-EditData`
    EditData,
    /// `client-ErrorPause`
    ErrorPause,
    /// `client-HandleError`
    HandleError,
    /// `client-Ping`
    Ping,
    /// `client-OpenUrl`
    OpenUrl,
    /// `client-ScanDir`
    ScanDir,
    /// `dm-Prompt`
    DmPrompt,
    /// `dm-OpenFile`
    DmOpenFile,
    /// `dm-MoveFile`
    DmMoveFile,
}

impl ClientFunction {
    /// Reports whether the function manipulates files in the local workspace.
    #[must_use]
    pub const fn is_local_file_action(self) -> bool {
        matches!(
            self,
            Self::ChmodFile
                | Self::OpenFile
                | Self::WriteFile
                | Self::CloseFile
                | Self::CheckFile
                | Self::SendFile
                | Self::DeleteFile
                | Self::MoveFile
                | Self::OpenMerge3
                | Self::WriteMerge
                | Self::CloseMerge
                | Self::OpenMerge2
                | Self::ReconcileEdit
                | Self::ReconcileAdd
                | Self::ReconcileFlush
                | Self::ReceiveFiles
                | Self::OpenDiff
                | Self::WriteDiff
                | Self::CloseDiff
                | Self::OpenMatch
                | Self::WriteMatch
                | Self::CloseMatch
                | Self::AckMatch
                | Self::ExactMatch
                | Self::ConvertFile
                | Self::ScanDir
                | Self::DmPrompt
                | Self::DmOpenFile
                | Self::DmMoveFile
        )
    }
}

/// Identity of a function from the closed function table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Function {
    /// A connection housekeeping function.
    Protocol(ProtocolFunction),
    /// A server-to-client callback.
    Client(ClientFunction),
    /// A user command.
    User,
    /// A server-internal function.
    Server,
    /// Not a known function.
    None,
}
