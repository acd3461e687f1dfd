//! Declaration surface of the theia plugin API, as consumed by the index
//! builder. Bodies are stubs; only the exported names matter here.

pub struct Disposable;

impl Disposable {
    pub fn dispose(self) {}
    pub fn from_iter(disposables: Vec<Disposable>) -> Disposable {
        unimplemented!()
    }
}

pub struct Uri {
    pub scheme: String,
    pub authority: String,
    pub path: String,
    pub query: String,
    pub fragment: String,
}

impl Uri {
    pub fn parse(value: &str) -> Uri {
        unimplemented!()
    }
    pub fn file(path: &str) -> Uri {
        unimplemented!()
    }
    pub fn fs_path(&self) -> String {
        unimplemented!()
    }
}

pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Position {
        unimplemented!()
    }
    pub fn translate(&self, line_delta: i32, character_delta: i32) -> Position {
        unimplemented!()
    }
}

pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Range {
        unimplemented!()
    }
    pub fn contains(&self, position: &Position) -> bool {
        unimplemented!()
    }
    pub fn is_empty(&self) -> bool {
        unimplemented!()
    }
}

pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

pub struct PluginContext {
    pub subscriptions: Vec<Disposable>,
    pub plugin_path: String,
    pub storage_path: Option<String>,
    pub global_state: Memento,
    pub workspace_state: Memento,
}

impl PluginContext {
    pub fn as_absolute_path(&self, relative: &str) -> String {
        unimplemented!()
    }
}

pub struct Memento;

impl Memento {
    pub fn get(&self, key: &str) -> Option<String> {
        unimplemented!()
    }
    pub fn update(&self, key: &str, value: String) {
        unimplemented!()
    }
}

pub struct Plugin {
    pub id: String,
    pub plugin_path: String,
    pub is_active: bool,
}

impl Plugin {
    pub fn activate(&self) {
        unimplemented!()
    }
}

pub mod plugins {
    use super::{Disposable, Plugin};

    pub fn all() -> Vec<Plugin> {
        unimplemented!()
    }
    pub fn get_plugin(id: &str) -> Option<Plugin> {
        unimplemented!()
    }
    pub fn on_did_change(listener: fn()) -> Disposable {
        unimplemented!()
    }
}

pub mod commands {
    use super::Disposable;

    pub fn register_command(command: &str, handler: fn()) -> Disposable {
        unimplemented!()
    }
    pub fn register_text_editor_command(command: &str, handler: fn()) -> Disposable {
        unimplemented!()
    }
    pub fn execute_command(command: &str, args: Vec<String>) -> Option<String> {
        unimplemented!()
    }
    pub fn get_commands(filter_internal: bool) -> Vec<String> {
        unimplemented!()
    }
}

pub mod window {
    use super::{
        Disposable, InputBoxOptions, OutputChannel, QuickPickItem, QuickPickOptions,
        StatusBarAlignment, StatusBarItem, Terminal, TextDocument, TextEditor,
    };

    pub fn show_information_message(message: &str) -> Option<String> {
        unimplemented!()
    }
    pub fn show_warning_message(message: &str) -> Option<String> {
        unimplemented!()
    }
    pub fn show_error_message(message: &str) -> Option<String> {
        unimplemented!()
    }
    pub fn show_quick_pick(items: Vec<QuickPickItem>, options: QuickPickOptions) -> Option<QuickPickItem> {
        unimplemented!()
    }
    pub fn show_input_box(options: InputBoxOptions) -> Option<String> {
        unimplemented!()
    }
    pub fn show_text_document(document: TextDocument) -> TextEditor {
        unimplemented!()
    }
    pub fn active_text_editor() -> Option<TextEditor> {
        unimplemented!()
    }
    pub fn visible_text_editors() -> Vec<TextEditor> {
        unimplemented!()
    }
    pub fn on_did_change_active_text_editor(listener: fn(Option<TextEditor>)) -> Disposable {
        unimplemented!()
    }
    pub fn create_status_bar_item(alignment: StatusBarAlignment, priority: i32) -> StatusBarItem {
        unimplemented!()
    }
    pub fn create_output_channel(name: &str) -> OutputChannel {
        unimplemented!()
    }
    pub fn create_terminal(name: &str) -> Terminal {
        unimplemented!()
    }
    pub fn set_status_bar_message(message: &str) -> Disposable {
        unimplemented!()
    }
}

pub mod workspace {
    use super::{Disposable, FileSystemWatcher, TextDocument, WorkspaceConfiguration, WorkspaceFolder};

    pub fn workspace_folders() -> Vec<WorkspaceFolder> {
        unimplemented!()
    }
    pub fn get_configuration(section: &str) -> WorkspaceConfiguration {
        unimplemented!()
    }
    pub fn on_did_change_configuration(listener: fn()) -> Disposable {
        unimplemented!()
    }
    pub fn open_text_document(path: &str) -> Option<TextDocument> {
        unimplemented!()
    }
    pub fn on_did_open_text_document(listener: fn(TextDocument)) -> Disposable {
        unimplemented!()
    }
    pub fn on_did_save_text_document(listener: fn(TextDocument)) -> Disposable {
        unimplemented!()
    }
    pub fn create_file_system_watcher(glob_pattern: &str) -> FileSystemWatcher {
        unimplemented!()
    }
    pub fn find_files(include: &str, exclude: &str) -> Vec<super::Uri> {
        unimplemented!()
    }
}

pub mod languages {
    use super::{Disposable, DiagnosticCollection};

    pub fn get_languages() -> Vec<String> {
        unimplemented!()
    }
    pub fn create_diagnostic_collection(name: &str) -> DiagnosticCollection {
        unimplemented!()
    }
    pub fn register_completion_item_provider(selector: &str) -> Disposable {
        unimplemented!()
    }
    pub fn register_hover_provider(selector: &str) -> Disposable {
        unimplemented!()
    }
    pub fn register_definition_provider(selector: &str) -> Disposable {
        unimplemented!()
    }
}

pub mod env {
    pub fn app_name() -> String {
        unimplemented!()
    }
    pub fn app_root() -> String {
        unimplemented!()
    }
    pub fn language() -> String {
        unimplemented!()
    }
    pub fn machine_id() -> String {
        unimplemented!()
    }
    pub fn session_id() -> String {
        unimplemented!()
    }
}

pub struct WorkspaceFolder {
    pub uri: Uri,
    pub name: String,
    pub index: u32,
}

pub struct WorkspaceConfiguration;

impl WorkspaceConfiguration {
    pub fn get(&self, section: &str) -> Option<String> {
        unimplemented!()
    }
    pub fn has(&self, section: &str) -> bool {
        unimplemented!()
    }
    pub fn update(&self, section: &str, value: String) {
        unimplemented!()
    }
}

pub struct FileSystemWatcher;

impl FileSystemWatcher {
    pub fn on_did_create(&self, listener: fn(Uri)) -> Disposable {
        unimplemented!()
    }
    pub fn on_did_change(&self, listener: fn(Uri)) -> Disposable {
        unimplemented!()
    }
    pub fn on_did_delete(&self, listener: fn(Uri)) -> Disposable {
        unimplemented!()
    }
    pub fn dispose(self) {}
}

pub struct TextDocument {
    pub uri: Uri,
    pub file_name: String,
    pub language_id: String,
    pub version: u32,
    pub is_dirty: bool,
    pub line_count: u32,
}

impl TextDocument {
    pub fn get_text(&self) -> String {
        unimplemented!()
    }
    pub fn line_at(&self, line: u32) -> TextLine {
        unimplemented!()
    }
    pub fn save(&self) -> bool {
        unimplemented!()
    }
}

pub struct TextLine {
    pub line_number: u32,
    pub text: String,
    pub is_empty_or_whitespace: bool,
}

pub struct TextEditor {
    pub document: TextDocument,
    pub selection: Selection,
}

impl TextEditor {
    pub fn edit(&self, callback: fn(TextEditorEdit)) -> bool {
        unimplemented!()
    }
    pub fn reveal_range(&self, range: Range) {
        unimplemented!()
    }
}

pub struct TextEditorEdit;

impl TextEditorEdit {
    pub fn insert(&self, location: Position, value: &str) {
        unimplemented!()
    }
    pub fn replace(&self, location: Range, value: &str) {
        unimplemented!()
    }
    pub fn delete(&self, location: Range) {
        unimplemented!()
    }
}

pub enum StatusBarAlignment {
    Left,
    Right,
}

pub struct StatusBarItem {
    pub alignment: StatusBarAlignment,
    pub priority: i32,
    pub text: String,
    pub tooltip: Option<String>,
    pub command: Option<String>,
}

impl StatusBarItem {
    pub fn show(&self) {
        unimplemented!()
    }
    pub fn hide(&self) {
        unimplemented!()
    }
    pub fn dispose(self) {}
}

pub struct OutputChannel {
    pub name: String,
}

impl OutputChannel {
    pub fn append(&self, value: &str) {
        unimplemented!()
    }
    pub fn append_line(&self, value: &str) {
        unimplemented!()
    }
    pub fn clear(&self) {
        unimplemented!()
    }
    pub fn show(&self) {
        unimplemented!()
    }
    pub fn dispose(self) {}
}

pub struct Terminal {
    pub name: String,
}

impl Terminal {
    pub fn send_text(&self, text: &str, add_new_line: bool) {
        unimplemented!()
    }
    pub fn show(&self) {
        unimplemented!()
    }
    pub fn hide(&self) {
        unimplemented!()
    }
    pub fn dispose(self) {}
}

pub struct QuickPickItem {
    pub label: String,
    pub description: Option<String>,
    pub detail: Option<String>,
    pub picked: bool,
}

pub struct QuickPickOptions {
    pub place_holder: Option<String>,
    pub match_on_description: bool,
    pub ignore_focus_out: bool,
}

pub struct InputBoxOptions {
    pub prompt: Option<String>,
    pub place_holder: Option<String>,
    pub value: Option<String>,
    pub password: bool,
}

pub struct MessageItem {
    pub title: String,
}

pub struct DiagnosticCollection {
    pub name: String,
}

impl DiagnosticCollection {
    pub fn set(&self, uri: Uri, diagnostics: Vec<Diagnostic>) {
        unimplemented!()
    }
    pub fn delete(&self, uri: Uri) {
        unimplemented!()
    }
    pub fn clear(&self) {
        unimplemented!()
    }
    pub fn dispose(self) {}
}

pub struct Diagnostic {
    pub range: Range,
    pub message: String,
    pub severity: DiagnosticSeverity,
    pub source: Option<String>,
}

pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
    Hint,
}

pub struct CompletionItem {
    pub label: String,
    pub kind: Option<CompletionItemKind>,
    pub detail: Option<String>,
    pub insert_text: Option<String>,
}

pub enum CompletionItemKind {
    Text,
    Method,
    Function,
    Constructor,
    Field,
    Variable,
    Class,
    Interface,
    Module,
    Property,
    Keyword,
    Snippet,
}

pub struct Hover {
    pub contents: Vec<MarkdownString>,
    pub range: Option<Range>,
}

pub struct MarkdownString {
    pub value: String,
}

impl MarkdownString {
    pub fn append_text(&mut self, value: &str) {
        unimplemented!()
    }
    pub fn append_markdown(&mut self, value: &str) {
        unimplemented!()
    }
}

pub struct CancellationToken {
    pub is_cancellation_requested: bool,
}

pub struct EventEmitter;

impl EventEmitter {
    pub fn fire(&self, payload: String) {
        unimplemented!()
    }
    pub fn dispose(self) {}
}

pub enum ProgressLocation {
    Notification,
    Window,
}

pub enum TreeItemCollapsibleState {
    None,
    Collapsed,
    Expanded,
}

pub struct TreeItem {
    pub label: String,
    pub collapsible_state: TreeItemCollapsibleState,
    pub tooltip: Option<String>,
}
