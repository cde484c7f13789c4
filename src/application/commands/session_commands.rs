//! Session Commands - 会话相关命令

/// 创建会话命令 - 由游戏设置表单提交
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    /// 玩家年龄，创建时换算为出生年份
    pub ages: Vec<i32>,
    pub topics: Vec<String>,
}
