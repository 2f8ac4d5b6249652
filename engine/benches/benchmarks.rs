//! Performance benchmarks for library-engine

use chrono::NaiveDate;
use library_engine::{BookRequest, Library, LibraryConfig, MemberRequest, PageRequest};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn title(i: usize) -> String {
    format!("Title {}", i)
}

fn populated_library(books: usize, members: usize) -> Library {
    let mut library = Library::new(LibraryConfig::new(1_000));
    for i in 0..books {
        library
            .add_book(&BookRequest::new(title(i), "Ann Lee"))
            .unwrap();
    }
    for i in 0..members {
        library
            .register_member(MemberRequest::new(format!("Member {}", i)), today())
            .unwrap();
    }
    library
}

fn bench_inventory(c: &mut Criterion) {
    let mut group = c.benchmark_group("inventory");

    group.bench_function("add_book_existing", |b| {
        let mut library = populated_library(100, 0);
        let request = BookRequest::new(title(50), "Ann Lee");
        b.iter(|| library.add_book(black_box(&request)))
    });

    for size in [100usize, 1_000] {
        group.bench_with_input(BenchmarkId::new("list_books", size), &size, |b, &size| {
            let library = populated_library(size, 0);
            let page = PageRequest::new(Some(2), Some(20)).unwrap();
            b.iter(|| library.books(black_box(page)))
        });
    }

    group.finish();
}

fn bench_lending(c: &mut Criterion) {
    let mut group = c.benchmark_group("lending");

    group.bench_function("borrow_return_cycle", |b| {
        let mut library = populated_library(100, 10);
        let request = BookRequest::new(title(7), "Ann Lee");
        b.iter(|| {
            library.borrow(black_box(3), &request).unwrap();
            library.return_book(black_box(3), &request).unwrap();
        })
    });

    group.bench_function("borrowed_title_counts", |b| {
        let mut library = populated_library(50, 20);
        for member in 1..=20 {
            for book in 0..10 {
                library
                    .add_book(&BookRequest::new(title(book), "Ann Lee"))
                    .unwrap();
                library
                    .borrow(member, &BookRequest::new(title(book), "Ann Lee"))
                    .unwrap();
            }
        }
        b.iter(|| library.borrowed_title_counts(black_box(PageRequest::default())))
    });

    group.finish();
}

criterion_group!(benches, bench_inventory, bench_lending);
criterion_main!(benches);
