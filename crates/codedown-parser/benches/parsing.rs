use codedown_parser::extract::DescriptionExtractor;
use codedown_parser::languages::Language;
use codedown_parser::treesitter::SourceFile;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const SAMPLE_JAVA: &str = r"
package com.acme.accounts;

import java.util.List;
import java.util.Map;
import java.util.Optional;

public class UserManager {
    private final Map<Long, String> users;

    public UserManager(Map<Long, String> users) {
        this.users = users;
    }

    public Optional<String> getUser(long id) {
        return Optional.ofNullable(users.get(id));
    }

    public List<String> listUsers(int limit) {
        return users.values().stream().limit(limit).toList();
    }

    public synchronized long createUser(String name, String email) {
        long id = users.size() + 1;
        users.put(id, name);
        return id;
    }

    public boolean deleteUser(long id) {
        return users.remove(id) != null;
    }

    public void forEachUser(java.util.function.BiConsumer<Long, String> action) {
        users.forEach((id, name) -> action.accept(id, name));
    }

    static final class Audit {
        private static int count;

        static void record(String... events) {
            java.util.Arrays.stream(events).forEach(e -> count++);
        }
    }
}
";

const SAMPLE_KOTLIN: &str = r"
package com.acme.accounts

class UserManager(private val users: MutableMap<Long, String>) {
    fun getUser(id: Long): String? = users[id]

    fun listUsers(limit: Int): List<String> {
        return users.values.take(limit)
    }

    fun createUser(name: String, email: String): Long {
        val id = users.size.toLong() + 1
        users[id] = name
        return id
    }

    fun forEachUser(action: (Long, String) -> Unit) {
        users.forEach { (id, name) -> action(id, name) }
    }

    companion object {
        fun empty() = UserManager(mutableMapOf())
    }
}
";

fn bench_java_parse(c: &mut Criterion) {
    c.bench_function("parse_java", |b| {
        b.iter(|| SourceFile::parse("UserManager.java", black_box(SAMPLE_JAVA), Language::Java))
    });
}

fn bench_java_describe_all(c: &mut Criterion) {
    let file = SourceFile::parse("UserManager.java", SAMPLE_JAVA, Language::Java).unwrap();
    let extractor = DescriptionExtractor::default();
    c.bench_function("describe_all_java", |b| {
        b.iter(|| extractor.describe_all(black_box(&file.root())))
    });
}

fn bench_kotlin_describe_all(c: &mut Criterion) {
    let file = SourceFile::parse("UserManager.kt", SAMPLE_KOTLIN, Language::Kotlin).unwrap();
    let extractor = DescriptionExtractor::default();
    c.bench_function("describe_all_kotlin", |b| {
        b.iter(|| extractor.describe_all(black_box(&file.root())))
    });
}

criterion_group!(
    benches,
    bench_java_parse,
    bench_java_describe_all,
    bench_kotlin_describe_all,
);
criterion_main!(benches);
