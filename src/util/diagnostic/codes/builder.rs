//! 通用诊断构建器
//!
//! 支持模板参数化的错误消息构建器，替代 trait-per-error 设计

use super::ErrorCodeDefinition;
use crate::util::diagnostic::Diagnostic;
use crate::util::span::Location;

/// 诊断构建器（支持模板参数）
#[derive(Debug, Clone)]
pub struct DiagnosticBuilder {
    definition: &'static ErrorCodeDefinition,
    params: Vec<(&'static str, String)>,
    location: Location,
    help: Option<String>,
    related: Vec<Diagnostic>,
}

impl DiagnosticBuilder {
    /// 创建新的诊断构建器
    pub fn new(definition: &'static ErrorCodeDefinition) -> Self {
        Self {
            definition,
            params: Vec::new(),
            location: Location::start(),
            help: None,
            related: Vec::new(),
        }
    }

    /// 添加模板参数
    pub fn param(
        mut self,
        key: &'static str,
        value: impl Into<String>,
    ) -> Self {
        self.params.push((key, value.into()));
        self
    }

    /// 设置位置
    #[inline]
    pub fn at(
        mut self,
        location: Location,
    ) -> Self {
        self.location = location;
        self
    }

    /// 设置帮助信息
    #[inline]
    pub fn help(
        mut self,
        help: impl Into<String>,
    ) -> Self {
        self.help = Some(help.into());
        self
    }

    /// 附加一条指向其他位置的说明
    pub fn note(
        mut self,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        self.related.push(Diagnostic::note(
            self.definition.kind,
            self.definition.code,
            message.into(),
            location,
        ));
        self
    }

    /// 构建 Diagnostic
    pub fn build(self) -> Diagnostic {
        debug_assert!(
            self.missing_params().is_empty(),
            "missing parameter(s) {:?} for error code '{}'",
            self.missing_params(),
            self.definition.code
        );

        let message = render_template(self.definition.message_template, &self.params);
        let mut diagnostic = Diagnostic::error(
            self.definition.kind,
            self.definition.code,
            message,
            self.location,
        );
        diagnostic.help = self.help;
        diagnostic.related = self.related;
        diagnostic
    }

    /// 模板中没有对应参数的占位符
    fn missing_params(&self) -> Vec<&'static str> {
        placeholders(self.definition.message_template)
            .filter(|key| !self.params.iter().any(|(k, _)| k == key))
            .collect()
    }
}

/// 模板中的 `{key}` 占位符
fn placeholders(template: &'static str) -> impl Iterator<Item = &'static str> {
    template.split('{').skip(1).filter_map(|rest| {
        let end = rest.find('}')?;
        Some(&rest[..end]).filter(|key| !key.is_empty())
    })
}

/// 用参数替换模板中的占位符
fn render_template(
    template: &str,
    params: &[(&'static str, String)],
) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let key = &after[..end];
                match params.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => output.push_str(value),
                    None => {
                        output.push('{');
                        output.push_str(key);
                        output.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                output.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    output.push_str(rest);
    output
}
