//! # Userdesk Auth Service
//!
//! ユーザー登録とメールアドレス・パスワードによるログイン検証を提供する HTTP サーバー。
//!
//! ## モジュール構成
//!
//! - `app_builder`: DI とルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: エラー定義と HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `usecase`: ユーザー登録・ログイン検証のビジネスロジック

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
